use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::address::en::{CityName, CountryCode};
use fake::faker::company::en::{CompanyName, Profession};
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::auth::responses::Role;
use crate::models::GeneratedUser;

/// Hard cap on one generation request.
pub const MAX_GENERATE_COUNT: usize = 500;

const MIN_AGE_YEARS: i64 = 18;
const MAX_AGE_YEARS: i64 = 75;
const ADMIN_RATIO: f64 = 0.2;

/// Produces plausible fake user records for batch-import exercises.
/// Passwords are plaintext here; hashing happens at import time.
pub struct UserGenerator;

impl UserGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate_one(&self) -> GeneratedUser {
        let mut rng = rand::thread_rng();

        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();

        let age_days = rng.gen_range(MIN_AGE_YEARS * 365..=MAX_AGE_YEARS * 365);
        let birth_date = Utc::now().date_naive() - Duration::days(age_days);

        let username = format!(
            "{}.{}{}",
            first_name.to_lowercase(),
            last_name.to_lowercase(),
            rng.gen_range(1..10_000)
        );

        let password_len = rng.gen_range(6..=10);
        let password: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(password_len)
            .map(char::from)
            .collect();

        let role = if rng.gen_bool(ADMIN_RATIO) {
            Role::Admin
        } else {
            Role::User
        };

        GeneratedUser {
            first_name,
            last_name,
            birth_date,
            city: CityName().fake(),
            country: CountryCode().fake(),
            avatar: format!("https://robohash.org/{username}.png?size=200x200"),
            company: CompanyName().fake(),
            job_position: Profession().fake(),
            mobile: PhoneNumber().fake(),
            username,
            email: FreeEmail().fake(),
            password,
            role,
        }
    }

    pub fn generate_many(&self, count: usize) -> Vec<GeneratedUser> {
        (0..count).map(|_| self.generate_one()).collect()
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count() {
        let generator = UserGenerator::new();
        assert_eq!(generator.generate_many(25).len(), 25);
        assert!(generator.generate_many(0).is_empty());
    }

    #[test]
    fn passwords_are_within_bounds() {
        let generator = UserGenerator::new();
        for user in generator.generate_many(50) {
            assert!((6..=10).contains(&user.password.len()), "{}", user.password);
        }
    }

    #[test]
    fn generated_fields_are_plausible() {
        let generator = UserGenerator::new();
        let today = Utc::now().date_naive();
        for user in generator.generate_many(50) {
            assert!(!user.first_name.is_empty());
            assert!(!user.username.is_empty());
            assert!(user.email.contains('@'));
            assert_eq!(user.country.len(), 2);
            assert!(user.birth_date < today);
            assert!(matches!(user.role, Role::Admin | Role::User));
        }
    }
}
