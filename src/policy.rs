//! Authorization policy for every route of the API
//!
//! Each route is guarded by a [`PolicyLayer`](crate::middleware::PolicyLayer)
//! built from a `(Resource, Operation)` pair, the required [`Access`] is looked
//! up in [`POLICY`]. Ownership checks on gebruikers happen in their
//! controllers, the table only holds the minimum role.

use db::Rol;

/// A group of routes sharing one access policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
	Plaatsen,
	Evenementen,
	Gereedschap,
	Gebruikers,
	Sessions,
	Health,
}

/// An operation on a [`Resource`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
	List,
	Get,
	Create,
	Update,
	Delete,
	/// Fetch the event a gereedschap is linked to
	LinkedEvenement,
}

/// Level of access needed to perform an operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
	/// No authentication needed
	Public,
	/// A valid session holding the given role
	Role(Rol),
}

impl Access {
	#[must_use]
	pub fn is_public(self) -> bool { matches!(self, Self::Public) }
}

const USER: Access = Access::Role(Rol::User);
const ADMIN: Access = Access::Role(Rol::Admin);

/// Every routed `(resource, operation)` pair and the access it requires
pub const POLICY: &[(Resource, Operation, Access)] = &[
	(Resource::Plaatsen, Operation::List, USER),
	(Resource::Plaatsen, Operation::Get, USER),
	(Resource::Plaatsen, Operation::Create, ADMIN),
	(Resource::Plaatsen, Operation::Update, ADMIN),
	(Resource::Plaatsen, Operation::Delete, ADMIN),
	(Resource::Evenementen, Operation::List, USER),
	(Resource::Evenementen, Operation::Get, USER),
	(Resource::Evenementen, Operation::Create, ADMIN),
	(Resource::Evenementen, Operation::Update, ADMIN),
	(Resource::Evenementen, Operation::Delete, ADMIN),
	(Resource::Gereedschap, Operation::List, USER),
	(Resource::Gereedschap, Operation::Get, USER),
	(Resource::Gereedschap, Operation::LinkedEvenement, USER),
	(Resource::Gereedschap, Operation::Create, ADMIN),
	(Resource::Gereedschap, Operation::Update, ADMIN),
	(Resource::Gereedschap, Operation::Delete, ADMIN),
	(Resource::Gebruikers, Operation::List, ADMIN),
	(Resource::Gebruikers, Operation::Get, USER),
	(Resource::Gebruikers, Operation::Create, Access::Public),
	(Resource::Gebruikers, Operation::Update, USER),
	(Resource::Gebruikers, Operation::Delete, USER),
	(Resource::Sessions, Operation::Create, Access::Public),
	(Resource::Sessions, Operation::Delete, USER),
	(Resource::Health, Operation::Get, Access::Public),
];

/// Look up the access required for an operation
///
/// Pairs missing from [`POLICY`] require an admin
#[must_use]
pub fn required_access(resource: Resource, operation: Operation) -> Access {
	POLICY
		.iter()
		.find(|(r, o, _)| *r == resource && *o == operation)
		.map_or(ADMIN, |(_, _, access)| *access)
}
