use std::collections::HashSet;

use rand::distr::Alphanumeric;
use rand::{Rng, rng};

/// Generate a set of unique strings using a closure
///
/// Every value gets a random suffix so collisions between generated values
/// are resolved quickly
pub fn generate_unique_set<F>(count: usize, mut f: F) -> Vec<String>
where
	F: FnMut() -> String,
{
	let mut set = HashSet::with_capacity(count);
	let mut rng = rng();

	while set.len() < count {
		let mut value = f();
		value.push('_');
		value.extend((0..6).map(|_| rng.sample(Alphanumeric) as char));
		set.insert(value);
	}

	set.into_iter().collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_values_are_unique() {
		let values = generate_unique_set(50, || "gent".to_string());

		assert_eq!(values.len(), 50);
		assert_eq!(values.iter().collect::<HashSet<_>>().len(), 50);
	}
}
