use std::sync::{LazyLock, Mutex, MutexGuard};

use common::RedisConn;
use redis::cmd;

const REDIS_DATABASES: usize = 16;

/// One URL per logical redis database, each usable by a single test at a time
pub static REDIS_CONNECTION_URLS: LazyLock<[Mutex<String>; REDIS_DATABASES]> =
	LazyLock::new(|| {
		let redis_url = std::env::var("REDIS_URL").unwrap();

		std::array::from_fn(|db| Mutex::new(format!("{redis_url}/{db}")))
	});

pub struct RedisUrlProvider;

/// Exclusive access to one redis database, flushed when dropped
pub struct RedisUrlGuard(MutexGuard<'static, String>);

impl RedisUrlProvider {
	/// Lock the first free redis database
	pub fn acquire() -> RedisUrlGuard {
		let mut i = 0;

		loop {
			match REDIS_CONNECTION_URLS[i].try_lock() {
				Ok(lock) => return RedisUrlGuard(lock),
				// A test that panicked while holding the lock still flushed
				// its database on drop
				Err(std::sync::TryLockError::Poisoned(poisoned)) => {
					return RedisUrlGuard(poisoned.into_inner());
				},
				Err(std::sync::TryLockError::WouldBlock) => {},
			}

			i = (i + 1) % REDIS_DATABASES;
		}
	}
}

impl RedisUrlGuard {
	pub async fn connect(&self) -> RedisConn {
		let client = redis::Client::open(self.0.as_str()).unwrap();

		client.get_multiplexed_async_connection().await.unwrap()
	}
}

impl Drop for RedisUrlGuard {
	fn drop(&mut self) {
		futures::executor::block_on(async {
			let mut conn = self.connect().await;

			let _: () = cmd("FLUSHDB").query_async(&mut conn).await.unwrap();
		});
	}
}
