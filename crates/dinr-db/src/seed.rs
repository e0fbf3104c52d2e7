//! Demo dataset for a fresh database.

use chrono::{Duration, Utc};

use dinr_core::entities::{NewOption, OptionDetails};

use crate::DinrDb;
use crate::error::DatabaseError;

struct SampleOption {
    name: &'static str,
    link: &'static str,
    cuisine: &'static str,
    price_range: &'static str,
    votes: i64,
}

const WORK_OPTIONS: [SampleOption; 2] = [
    SampleOption {
        name: "Pasta Paradise",
        link: "https://pastaparadise.com",
        cuisine: "Italian",
        price_range: "$$",
        votes: 3,
    },
    SampleOption {
        name: "Taco Fiesta",
        link: "https://tacofiesta.com",
        cuisine: "Mexican",
        price_range: "$",
        votes: 5,
    },
];

const FRIENDS_OPTIONS: [SampleOption; 1] = [SampleOption {
    name: "Sushi Zen",
    link: "https://sushizen.com",
    cuisine: "Japanese",
    price_range: "$$$",
    votes: 2,
}];

impl DinrDb {
    /// Insert the demo dataset if the database has no users yet.
    ///
    /// One user, three groups they belong to, two sessions and three options
    /// with preset votes. Returns whether anything was inserted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any insert fails. Rows inserted before the
    /// failure are kept.
    pub async fn seed_sample_data(&self) -> Result<bool, DatabaseError> {
        if self.count_users().await? > 0 {
            tracing::debug!("users present; skipping sample data");
            return Ok(false);
        }

        let user = self
            .create_user("Alex Johnson", "alex@example.com", Some("🧑‍💻"))
            .await?;

        let work = self
            .create_group(
                "Work Team",
                Some("Weekly lunch decisions for the office"),
                Some("💼"),
                Some("#667eea"),
                Some(user.id),
            )
            .await?;
        let friends = self
            .create_group(
                "Weekend Squad",
                Some("Friends weekend dining adventures"),
                Some("🎉"),
                Some("#f093fb"),
                Some(user.id),
            )
            .await?;
        self.create_group(
            "Family Dinners",
            Some("Sunday family meal planning"),
            Some("👨‍👩‍👧‍👦"),
            Some("#4facfe"),
            Some(user.id),
        )
        .await?;

        let friday = self
            .create_session(
                "Friday Team Lunch",
                Some("Let's decide where to eat this Friday!"),
                work.id,
                Some(Utc::now() + Duration::days(2)),
            )
            .await?;
        let saturday = self
            .create_session(
                "Saturday Night Dinner",
                Some("Epic dinner spot for Saturday night"),
                friends.id,
                None,
            )
            .await?;

        let scoped = WORK_OPTIONS
            .iter()
            .map(|o| (o, friday.id))
            .chain(FRIENDS_OPTIONS.iter().map(|o| (o, saturday.id)));
        for (sample, session_id) in scoped {
            self.insert_option_with_votes(
                &NewOption {
                    name: sample.name.to_string(),
                    link: sample.link.to_string(),
                    details: OptionDetails {
                        image_url: None,
                        cuisine: Some(sample.cuisine.to_string()),
                        price_range: Some(sample.price_range.to_string()),
                    },
                    session_id: Some(session_id),
                    created_at: Utc::now(),
                },
                sample.votes,
            )
            .await?;
        }

        tracing::info!(user_id = %user.id, "sample data seeded");
        Ok(true)
    }
}
