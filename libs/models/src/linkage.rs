//! Linking [`Gereedschap`](crate::Gereedschap) to
//! [`Evenement`](crate::Evenement)en
//!
//! A tool that is linked to an event is never available. Every function in
//! this module keeps `beschikbaar == (evenement_id IS NULL)` for the tools it
//! touches and must run inside the transaction that writes the event row.

use std::collections::BTreeSet;

use chrono::Utc;
use db::gereedschap;
use diesel::prelude::*;

/// The tool updates needed to move an event from its current set of linked
/// tools to a requested set
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkagePlan {
	pub to_link:   Vec<i32>,
	pub to_unlink: Vec<i32>,
}

impl LinkagePlan {
	/// Compute the plan for an event
	///
	/// `candidates` holds `(tool id, linked event id)` for every requested
	/// tool that exists. Requested tools that do not exist or are linked to a
	/// different event are skipped.
	#[must_use]
	pub fn new(
		evenement_id: i32,
		previously_linked: &[i32],
		requested: &[i32],
		candidates: &[(i32, Option<i32>)],
	) -> Self {
		let previous: BTreeSet<i32> =
			previously_linked.iter().copied().collect();
		let requested: BTreeSet<i32> = requested.iter().copied().collect();

		let linkable: BTreeSet<i32> = candidates
			.iter()
			.filter(|(_, linked_to)| {
				linked_to.is_none_or(|linked_to| linked_to == evenement_id)
			})
			.map(|(id, _)| *id)
			.collect();

		let to_link = requested
			.difference(&previous)
			.filter(|id| linkable.contains(id))
			.copied()
			.collect();

		let to_unlink = previous.difference(&requested).copied().collect();

		Self { to_link, to_unlink }
	}

	/// Compute the plan from the locked `(tool id, linked event id)` rows of
	/// every tool that is either linked to the event or requested
	#[must_use]
	pub fn from_locked(
		evenement_id: i32,
		requested: &[i32],
		locked: &[(i32, Option<i32>)],
	) -> Self {
		let previously_linked: Vec<i32> = locked
			.iter()
			.filter(|(_, linked_to)| *linked_to == Some(evenement_id))
			.map(|(id, _)| *id)
			.collect();

		Self::new(evenement_id, &previously_linked, requested, locked)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.to_link.is_empty() && self.to_unlink.is_empty()
	}
}

/// Availability of a tool after a mutation
///
/// Linked tools are never available and unlinking always frees a tool. An
/// unlinked tool whose linkage was not touched keeps the requested value, or
/// its current one.
#[must_use]
pub fn derive_beschikbaar(
	evenement_id: Option<i32>,
	linkage_touched: bool,
	requested: Option<bool>,
	current: bool,
) -> bool {
	match (evenement_id, linkage_touched) {
		(Some(_), _) => false,
		(None, true) => true,
		(None, false) => requested.unwrap_or(current),
	}
}

/// Reconcile the tools linked to an event with the requested set
///
/// Every tool row involved is locked in id order until the surrounding
/// transaction ends
pub(crate) fn reconcile(
	conn: &mut PgConnection,
	ev_id: i32,
	requested: &[i32],
) -> QueryResult<LinkagePlan> {
	let locked: Vec<(i32, Option<i32>)> = gereedschap::table
		.filter(
			gereedschap::evenement_id
				.eq(ev_id)
				.or(gereedschap::id.eq_any(requested)),
		)
		.order_by(gereedschap::id)
		.select((gereedschap::id, gereedschap::evenement_id))
		.for_update()
		.get_results(conn)?;

	let plan = LinkagePlan::from_locked(ev_id, requested, &locked);

	if plan.is_empty() {
		return Ok(plan);
	}

	let now = Utc::now().naive_utc();

	diesel::update(
		gereedschap::table.filter(gereedschap::id.eq_any(&plan.to_link)),
	)
	.set((
		gereedschap::evenement_id.eq(Some(ev_id)),
		gereedschap::beschikbaar.eq(false),
		gereedschap::updated_at.eq(now),
	))
	.execute(conn)?;

	diesel::update(
		gereedschap::table.filter(gereedschap::id.eq_any(&plan.to_unlink)),
	)
	.set((
		gereedschap::evenement_id.eq(None::<i32>),
		gereedschap::beschikbaar.eq(true),
		gereedschap::updated_at.eq(now),
	))
	.execute(conn)?;

	debug!("reconciled tools of evenement {ev_id} -- {plan:?}");

	Ok(plan)
}

/// Free every tool linked to an event
pub(crate) fn free_all(
	conn: &mut PgConnection,
	ev_id: i32,
) -> QueryResult<usize> {
	diesel::update(
		gereedschap::table.filter(gereedschap::evenement_id.eq(ev_id)),
	)
	.set((
		gereedschap::evenement_id.eq(None::<i32>),
		gereedschap::beschikbaar.eq(true),
		gereedschap::updated_at.eq(Utc::now().naive_utc()),
	))
	.execute(conn)
}
