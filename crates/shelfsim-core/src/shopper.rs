//! Synthetic shopper identities.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{ShopperProfile, SimConfig};

/// A generated customer. Identity fields are cosmetic; only `profile`
/// influences behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shopper {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub race: String,
    pub profession: String,
    pub profile: String,
}

impl Shopper {
    /// Draw an identity for a customer of `profile`.
    ///
    /// Age falls inside the profile's range and the profession is one mapped
    /// to the profile; with no mapped profession the profile name is used.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        config: &SimConfig,
        profile: &ShopperProfile,
    ) -> Self {
        let pools = &config.names;
        let (lo, hi) = profile.age_range;
        let professions = config.professions_for(&profile.name);

        Self {
            first_name: pick(rng, &pools.first_names, "Alex"),
            last_name: pick(rng, &pools.last_names, "Doe"),
            age: rng.random_range(lo.min(hi)..=hi),
            race: pick(rng, &pools.races, "Unspecified"),
            profession: professions
                .choose(rng)
                .map_or_else(|| profile.name.clone(), |p| (*p).to_string()),
            profile: profile.name.clone(),
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[String], fallback: &str) -> String {
    pool.choose(rng)
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

impl fmt::Display for Shopper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Age {}, {}, {} [{}]",
            self.full_name(),
            self.age,
            self.race,
            self.profession,
            self.profile
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn identity_respects_profile() {
        let config = SimConfig::default();
        let retired = config.profile("Retired").unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let shopper = Shopper::generate(&mut rng, &config, retired);
            assert!((60..=80).contains(&shopper.age));
            assert_eq!(shopper.profession, "Retired");
            assert_eq!(shopper.profile, "Retired");
            assert!(config.names.first_names.contains(&shopper.first_name));
        }
    }

    #[test]
    fn unmapped_profile_uses_own_name() {
        let mut config = SimConfig::default();
        config.profession_to_profile.retain(|_, p| p != "Student");
        let student = config.profile("Student").unwrap().clone();
        let mut rng = StdRng::seed_from_u64(4);
        let shopper = Shopper::generate(&mut rng, &config, &student);
        assert_eq!(shopper.profession, "Student");
        assert!(shopper.to_string().ends_with("[Student]"));
    }
}
