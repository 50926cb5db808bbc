mod util;

use std::env;

use chrono::{TimeDelta, Utc};
use clap::Parser;
use common::{DbConn, Error};
use db::Rol;
use deadpool_diesel::postgres::{Manager, Pool};
use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StreetName};
use fake::faker::company::raw::CompanyName;
use fake::faker::internet::raw::Username;
use fake::faker::lorem::raw::{Sentence, Word};
use fake::locales::EN;
use models::{NewEvenement, NewGebruiker, NewGereedschap, NewPlaats};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, rng};

use crate::util::generate_unique_set;

/// Fill a database with demo data
#[derive(Parser, Debug)]
struct Opt {
	#[arg(long, short = 'g', default_value_t = 20)]
	gebruikers:       usize,
	#[arg(long, short = 'p', default_value_t = 10)]
	plaatsen:         usize,
	#[arg(long, short = 'e', default_value_t = 30)]
	evenementen:      usize,
	#[arg(long, short = 't', default_value_t = 60)]
	gereedschap:      usize,
	/// Password of the seeded `admin` gebruiker
	#[arg(long, default_value = "admin1234")]
	admin_wachtwoord: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let cli = Opt::parse();
	let conn = get_conn().await;

	println!("Seeding {} gebruikers…", cli.gebruikers);
	let gebruiker_ids =
		seed_gebruikers(&conn, cli.gebruikers, cli.admin_wachtwoord).await?;

	println!("Seeding {} plaatsen…", cli.plaatsen);
	let plaats_ids = seed_plaatsen(&conn, cli.plaatsen).await?;

	println!("Seeding {} gereedschap…", cli.gereedschap);
	let gereedschap_ids = seed_gereedschap(&conn, cli.gereedschap).await?;

	if plaats_ids.is_empty() {
		println!("No plaatsen to hold evenementen, skipping evenementen");

		return Ok(());
	}

	println!("Seeding {} evenementen…", cli.evenementen);
	let linked = seed_evenementen(
		&conn,
		cli.evenementen,
		&plaats_ids,
		&gebruiker_ids,
		gereedschap_ids,
	)
	.await?;
	println!("Linked {linked} gereedschap to evenementen");

	Ok(())
}

/// Get a database connection from the pool
async fn get_conn() -> DbConn {
	let database_url = env::var("DATABASE_URL").expect("DATABASE_URL missing");

	let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
	let pool = Pool::builder(manager).build().expect("Failed to create pool");

	pool.get().await.expect("Failed to get a database connection")
}

/// Seed one `admin` gebruiker and `count` regular gebruikers
async fn seed_gebruikers(
	conn: &DbConn,
	count: usize,
	admin_wachtwoord: String,
) -> Result<Vec<i32>, Error> {
	let admin = NewGebruiker {
		naam:       "admin".to_string(),
		wachtwoord: admin_wachtwoord,
		roles:      vec![Rol::Admin],
	}
	.insert(conn)
	.await?;

	let mut ids = vec![admin.gebruiker.id];

	let namen = generate_unique_set(count, || Username(EN).fake::<String>());

	for naam in namen {
		let gebruiker = NewGebruiker {
			naam,
			wachtwoord: "gebruiker1234".to_string(),
			roles: vec![Rol::User],
		}
		.insert(conn)
		.await?;

		ids.push(gebruiker.gebruiker.id);
	}

	Ok(ids)
}

/// Seed venues with unique names and Belgian style postcodes
async fn seed_plaatsen(conn: &DbConn, count: usize) -> Result<Vec<i32>, Error> {
	let namen = generate_unique_set(count, || CompanyName(EN).fake::<String>());

	let mut ids = Vec::with_capacity(count);

	for naam in namen {
		let postcode = rng().random_range(1000..=9999).to_string();

		let plaats = NewPlaats {
			naam,
			straat: StreetName(EN).fake(),
			huisnummer: BuildingNumber(EN).fake(),
			postcode,
			gemeente: CityName(EN).fake(),
		}
		.insert(conn)
		.await?;

		ids.push(plaats.plaats.id);
	}

	Ok(ids)
}

/// Seed unlinked tools, some of them unavailable
async fn seed_gereedschap(
	conn: &DbConn,
	count: usize,
) -> Result<Vec<i32>, Error> {
	let mut ids = Vec::with_capacity(count);

	for _ in 0..count {
		let beschikbaar = rng().random_bool(0.9);

		let gereedschap = NewGereedschap {
			naam:         Word(EN).fake(),
			beschrijving: Sentence(EN, 3..8).fake(),
			beschikbaar:  Some(beschikbaar),
			evenement_id: None,
		}
		.insert(conn)
		.await?;

		if beschikbaar {
			ids.push(gereedschap.gereedschap.id);
		}
	}

	Ok(ids)
}

/// Seed events, linking each to a few of the available tools
///
/// Returns the amount of linked tools
async fn seed_evenementen(
	conn: &DbConn,
	count: usize,
	plaats_ids: &[i32],
	gebruiker_ids: &[i32],
	mut free_gereedschap: Vec<i32>,
) -> Result<usize, Error> {
	free_gereedschap.shuffle(&mut rng());

	let mut linked = 0;

	for _ in 0..count {
		let (plaats_id, auteur_id, offset, gereedschap_ids) = {
			let mut rng = rng();

			let plaats_id = *plaats_ids.choose(&mut rng).unwrap_or(&0);
			let auteur_id = *gebruiker_ids.choose(&mut rng).unwrap_or(&0);
			let offset = TimeDelta::hours(rng.random_range(-720..4320));

			let amount = rng.random_range(0..=3).min(free_gereedschap.len());
			let gereedschap_ids = free_gereedschap
				.split_off(free_gereedschap.len() - amount);

			(plaats_id, auteur_id, offset, gereedschap_ids)
		};

		linked += gereedschap_ids.len();

		NewEvenement {
			naam: Sentence(EN, 1..4).fake(),
			datum: Utc::now().naive_utc() + offset,
			plaats_id,
			auteur_id,
			gereedschap_ids: Some(gereedschap_ids),
		}
		.insert(conn)
		.await?;
	}

	Ok(linked)
}
