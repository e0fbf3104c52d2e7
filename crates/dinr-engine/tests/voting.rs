//! Voting engine behaviour over the in-memory stores.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;

use dinr_core::entities::{NewOption, OptionDetails, VoteOption, VotingSession};
use dinr_core::enums::LockScope;
use dinr_core::errors::StorageError;
use dinr_core::ids::{GroupId, OptionId, SessionId};
use dinr_engine::memory::{MemoryLockStore, MemoryOptionStore, MemorySessionStore};
use dinr_engine::{GlobalLockStore, OptionStore, SessionStore, VotingEngine};

type MemoryEngine =
    VotingEngine<Arc<MemoryOptionStore>, Arc<MemorySessionStore>, Arc<MemoryLockStore>>;

struct Fixture {
    engine: MemoryEngine,
    sessions: Arc<MemorySessionStore>,
}

fn session(id: i64, locked: bool) -> VotingSession {
    VotingSession {
        id: SessionId(id),
        group_id: GroupId(1),
        title: format!("Session {id}"),
        description: None,
        locked,
        created_at: Utc::now(),
        deadline: Some(Utc::now() + Duration::days(1)),
    }
}

async fn fixture() -> Fixture {
    let sessions = Arc::new(MemorySessionStore::new());
    sessions.insert(session(1, false)).await;
    sessions.insert(session(2, false)).await;
    let engine = VotingEngine::new(
        Arc::new(MemoryOptionStore::new()),
        Arc::clone(&sessions),
        Arc::new(MemoryLockStore::new()),
    );
    Fixture { engine, sessions }
}

async fn votes_of(engine: &MemoryEngine, id: OptionId) -> i64 {
    engine.option(id).await.unwrap().votes
}

// ---------------------------------------------------------------------------
// Option creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_option_trims_and_starts_at_zero() {
    let fx = fixture().await;
    let option = fx
        .engine
        .add_option("  Taco Fiesta ", " https://tacofiesta.com ", None)
        .await
        .unwrap();

    assert_eq!(option.name, "Taco Fiesta");
    assert_eq!(option.link, "https://tacofiesta.com");
    assert_eq!(option.votes, 0);
    assert_eq!(option.session_id, None);
    assert_eq!(fx.engine.all_options().await.unwrap(), vec![option]);
}

#[rstest]
#[case("", "https://x.example", "name")]
#[case("   ", "https://x.example", "name")]
#[case("Deli", "", "link")]
#[case("Deli", "\t\n", "link")]
#[tokio::test]
async fn add_option_rejects_blank_text(
    #[case] name: &str,
    #[case] link: &str,
    #[case] field: &str,
) {
    let fx = fixture().await;
    let err = fx.engine.add_option(name, link, None).await.unwrap_err();
    assert!(err.is_validation(), "expected validation error, got {err}");
    assert!(err.to_string().contains(field));
    assert!(fx.engine.all_options().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_option_to_missing_session_is_not_found() {
    let fx = fixture().await;
    let err = fx
        .engine
        .add_option("Deli", "https://deli.example", Some(SessionId(99)))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn add_option_rejects_non_positive_session_id() {
    let fx = fixture().await;
    let err = fx
        .engine
        .add_option("Deli", "https://deli.example", Some(SessionId(0)))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn add_option_to_session_passes_metadata_through() {
    let fx = fixture().await;
    let option = fx
        .engine
        .add_option_to_session(
            "Pasta Paradise",
            "https://pastaparadise.com",
            OptionDetails {
                image_url: Some("  https://img.example/pasta.png  ".into()),
                cuisine: Some("Italian".into()),
                price_range: Some("$$".into()),
            },
            SessionId(1),
        )
        .await
        .unwrap();

    assert_eq!(option.session_id, Some(SessionId(1)));
    assert_eq!(
        option.details,
        OptionDetails {
            image_url: Some("https://img.example/pasta.png".into()),
            cuisine: Some("Italian".into()),
            price_range: Some("$$".into()),
        }
    );
}

#[tokio::test]
async fn blank_image_url_is_dropped() {
    let fx = fixture().await;
    let option = fx
        .engine
        .add_option_to_session(
            "Sushi Zen",
            "https://sushizen.com",
            OptionDetails {
                image_url: Some("   ".into()),
                ..OptionDetails::default()
            },
            SessionId(2),
        )
        .await
        .unwrap();
    assert_eq!(option.details.image_url, None);
}

// ---------------------------------------------------------------------------
// Voting
// ---------------------------------------------------------------------------

#[rstest]
#[case(&[1, 1, 1], 3)]
#[case(&[5, -1000], 0)]
#[case(&[-1, -1, 2], 2)]
#[case(&[3, -2, -2, 4], 4)]
#[tokio::test]
async fn vote_accumulates_and_floors_at_zero(#[case] deltas: &[i64], #[case] expected: i64) {
    let fx = fixture().await;
    let option = fx
        .engine
        .add_option("Deli", "https://deli.example", None)
        .await
        .unwrap();

    for delta in deltas {
        fx.engine.vote(option.id, *delta).await.unwrap();
        assert!(votes_of(&fx.engine, option.id).await >= 0);
    }
    assert_eq!(votes_of(&fx.engine, option.id).await, expected);
}

#[tokio::test]
async fn large_negative_delta_clamps_five_to_zero() {
    let fx = fixture().await;
    let option = fx
        .engine
        .add_option("Deli", "https://deli.example", None)
        .await
        .unwrap();
    fx.engine.vote(option.id, 5).await.unwrap();

    fx.engine.vote(option.id, -1000).await.unwrap();
    assert_eq!(votes_of(&fx.engine, option.id).await, 0);
}

#[tokio::test]
async fn vote_on_missing_option_is_not_found() {
    let fx = fixture().await;
    let err = fx.engine.vote(OptionId(404), 1).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Entity not found: option 404");
}

#[tokio::test]
async fn vote_rejects_non_positive_id() {
    let fx = fixture().await;
    assert!(fx.engine.vote(OptionId(-2), 1).await.unwrap_err().is_validation());
}

// ---------------------------------------------------------------------------
// Locks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn global_lock_blocks_every_vote_and_unscoped_add() {
    let fx = fixture().await;
    let unscoped = fx
        .engine
        .add_option("Deli", "https://deli.example", None)
        .await
        .unwrap();
    let scoped = fx
        .engine
        .add_option("Taco", "https://taco.example", Some(SessionId(1)))
        .await
        .unwrap();

    fx.engine.lock_voting(true).await.unwrap();
    assert!(fx.engine.is_voting_locked().await);

    for id in [unscoped.id, scoped.id] {
        let err = fx.engine.vote(id, 1).await.unwrap_err();
        assert_eq!(err.lock_scope(), Some(LockScope::Global));
    }
    let err = fx
        .engine
        .add_option("Pho", "https://pho.example", None)
        .await
        .unwrap_err();
    assert_eq!(err.lock_scope(), Some(LockScope::Global));

    assert_eq!(votes_of(&fx.engine, unscoped.id).await, 0);
    assert_eq!(votes_of(&fx.engine, scoped.id).await, 0);
}

#[tokio::test]
async fn global_lock_does_not_gate_scoped_creation() {
    let fx = fixture().await;
    fx.engine.lock_voting(true).await.unwrap();

    let option = fx
        .engine
        .add_option("Taco", "https://taco.example", Some(SessionId(1)))
        .await
        .unwrap();
    assert_eq!(option.session_id, Some(SessionId(1)));
}

#[tokio::test]
async fn session_lock_only_affects_its_own_session() {
    let fx = fixture().await;
    let in_locked = fx
        .engine
        .add_option("Taco", "https://taco.example", Some(SessionId(1)))
        .await
        .unwrap();
    let in_open = fx
        .engine
        .add_option("Sushi", "https://sushi.example", Some(SessionId(2)))
        .await
        .unwrap();

    let session = fx.engine.lock_session(SessionId(1), true).await.unwrap();
    assert!(session.locked);
    assert!(!fx.engine.is_voting_locked().await);

    let err = fx.engine.vote(in_locked.id, 1).await.unwrap_err();
    assert_eq!(err.lock_scope(), Some(LockScope::Session(SessionId(1))));
    let err = fx
        .engine
        .add_option("Pho", "https://pho.example", Some(SessionId(1)))
        .await
        .unwrap_err();
    assert_eq!(err.lock_scope(), Some(LockScope::Session(SessionId(1))));

    fx.engine.vote(in_open.id, 1).await.unwrap();
    fx.engine
        .add_option("Ramen", "https://ramen.example", Some(SessionId(2)))
        .await
        .unwrap();
    assert_eq!(votes_of(&fx.engine, in_open.id).await, 1);
}

#[tokio::test]
async fn session_lock_round_trip_restores_mutability() {
    let fx = fixture().await;
    let option = fx
        .engine
        .add_option("Taco", "https://taco.example", Some(SessionId(1)))
        .await
        .unwrap();
    fx.engine.vote(option.id, 3).await.unwrap();

    fx.engine.lock_session(SessionId(1), true).await.unwrap();
    assert!(fx.engine.vote(option.id, 1).await.unwrap_err().is_locked());
    let reopened = fx.engine.lock_session(SessionId(1), false).await.unwrap();

    assert!(!reopened.locked);
    assert_eq!(votes_of(&fx.engine, option.id).await, 3);
    fx.engine.vote(option.id, 1).await.unwrap();
    assert_eq!(votes_of(&fx.engine, option.id).await, 4);
}

#[tokio::test]
async fn lock_session_on_missing_session_is_not_found() {
    let fx = fixture().await;
    let err = fx.engine.lock_session(SessionId(77), true).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn global_unlock_restores_voting_without_touching_sessions() {
    let fx = fixture().await;
    let option = fx
        .engine
        .add_option("Deli", "https://deli.example", None)
        .await
        .unwrap();
    fx.engine.lock_voting(true).await.unwrap();
    fx.engine.lock_voting(false).await.unwrap();

    fx.engine.vote(option.id, 2).await.unwrap();
    assert_eq!(votes_of(&fx.engine, option.id).await, 2);
    let stored = dinr_engine::SessionStore::get(&fx.sessions, SessionId(1))
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.locked);
}

// ---------------------------------------------------------------------------
// Winners and projections
// ---------------------------------------------------------------------------

async fn seed_board(engine: &MemoryEngine) -> (VoteOption, VoteOption, VoteOption) {
    let taco = engine
        .add_option("Taco", "https://taco.example", Some(SessionId(1)))
        .await
        .unwrap();
    let pasta = engine
        .add_option("Pasta", "https://pasta.example", Some(SessionId(1)))
        .await
        .unwrap();
    let sushi = engine
        .add_option("Sushi", "https://sushi.example", Some(SessionId(1)))
        .await
        .unwrap();
    engine.vote(taco.id, 5).await.unwrap();
    engine.vote(pasta.id, 3).await.unwrap();
    engine.vote(sushi.id, 5).await.unwrap();
    (taco, pasta, sushi)
}

#[tokio::test]
async fn winner_tie_goes_to_earliest_option_every_time() {
    let fx = fixture().await;
    let (taco, _, _) = seed_board(&fx.engine).await;

    for _ in 0..5 {
        let winner = fx.engine.winner().await.unwrap().unwrap();
        assert_eq!(winner.id, taco.id);
        let session_winner = fx.engine.session_winner(SessionId(1)).await.unwrap().unwrap();
        assert_eq!(session_winner.id, taco.id);
    }
}

#[tokio::test]
async fn winner_of_empty_board_is_none() {
    let fx = fixture().await;
    assert_eq!(fx.engine.winner().await.unwrap(), None);
    assert_eq!(fx.engine.session_winner(SessionId(1)).await.unwrap(), None);
    // Unknown sessions are not an error for reads.
    assert_eq!(fx.engine.session_winner(SessionId(500)).await.unwrap(), None);
}

#[tokio::test]
async fn session_winner_rejects_non_positive_id() {
    let fx = fixture().await;
    assert!(fx.engine.session_winner(SessionId(0)).await.unwrap_err().is_validation());
    assert!(fx.engine.session_options(SessionId(-1)).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn projections_are_ranked_and_scoped() {
    let fx = fixture().await;
    let (taco, pasta, sushi) = seed_board(&fx.engine).await;
    let other = fx
        .engine
        .add_option("Pho", "https://pho.example", Some(SessionId(2)))
        .await
        .unwrap();
    fx.engine.vote(other.id, 9).await.unwrap();

    let session_ids: Vec<_> = fx
        .engine
        .session_options(SessionId(1))
        .await
        .unwrap()
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(session_ids, vec![taco.id, sushi.id, pasta.id]);

    let all_ids: Vec<_> = fx
        .engine
        .all_options()
        .await
        .unwrap()
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(all_ids, vec![other.id, taco.id, sushi.id, pasta.id]);
    assert_eq!(fx.engine.winner().await.unwrap().unwrap().id, other.id);
}

#[tokio::test]
async fn session_results_skip_unvoted_options() {
    let fx = fixture().await;
    let (taco, pasta, sushi) = seed_board(&fx.engine).await;
    fx.engine.vote(pasta.id, -10).await.unwrap();

    let ids: Vec<_> = fx
        .engine
        .session_results(SessionId(1))
        .await
        .unwrap()
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec![taco.id, sushi.id]);
}

#[tokio::test]
async fn status_reports_lock_and_count() {
    let fx = fixture().await;
    seed_board(&fx.engine).await;
    fx.engine.lock_voting(true).await.unwrap();

    let status = fx.engine.status().await.unwrap();
    assert!(status.locked);
    assert_eq!(status.total_options, 3);
}

// ---------------------------------------------------------------------------
// Storage failures
// ---------------------------------------------------------------------------

/// A lock store whose backend is down.
struct UnreachableLockStore;

impl GlobalLockStore for UnreachableLockStore {
    async fn get(&self) -> Result<bool, StorageError> {
        Err(StorageError::Unavailable("lock table offline".into()))
    }

    async fn upsert(&self, _locked: bool) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("lock table offline".into()))
    }
}

fn engine_with_unreachable_lock(
    sessions: Arc<MemorySessionStore>,
) -> VotingEngine<Arc<MemoryOptionStore>, Arc<MemorySessionStore>, UnreachableLockStore> {
    VotingEngine::new(
        Arc::new(MemoryOptionStore::new()),
        sessions,
        UnreachableLockStore,
    )
}

#[tokio::test]
async fn lock_read_failure_fails_open_for_reads() {
    let engine = engine_with_unreachable_lock(Arc::new(MemorySessionStore::new()));
    assert!(!engine.is_voting_locked().await);

    let status = engine.status().await.unwrap();
    assert!(!status.locked);
    assert_eq!(status.total_options, 0);
}

#[tokio::test]
async fn lock_read_failure_propagates_on_writes() {
    let sessions = Arc::new(MemorySessionStore::new());
    sessions.insert(session(1, false)).await;
    let engine = engine_with_unreachable_lock(Arc::clone(&sessions));

    let err = engine
        .add_option("Deli", "https://deli.example", None)
        .await
        .unwrap_err();
    assert!(err.is_storage());
    assert!(engine.lock_voting(true).await.unwrap_err().is_storage());

    // Scoped creation never reads the global flag, so it still succeeds...
    let option = engine
        .add_option("Taco", "https://taco.example", Some(SessionId(1)))
        .await
        .unwrap();
    // ...but voting does, and fails closed.
    assert!(engine.vote(option.id, 1).await.unwrap_err().is_storage());
}

// ---------------------------------------------------------------------------
// Locks set while a vote is retrying
// ---------------------------------------------------------------------------

/// Option store whose first conditional update loses the race. While losing
/// it sets a lock, as a concurrent `lock_session`/`lock_voting` caller would.
struct LockDuringConflict {
    inner: MemoryOptionStore,
    sessions: Arc<MemorySessionStore>,
    global: Arc<MemoryLockStore>,
    scope: LockScope,
    conflicted: AtomicBool,
}

impl OptionStore for LockDuringConflict {
    async fn create(&self, option: NewOption) -> Result<VoteOption, StorageError> {
        self.inner.create(option).await
    }

    async fn get(&self, id: OptionId) -> Result<Option<VoteOption>, StorageError> {
        OptionStore::get(&self.inner, id).await
    }

    async fn list_all(&self) -> Result<Vec<VoteOption>, StorageError> {
        self.inner.list_all().await
    }

    async fn list_by_session(&self, session_id: SessionId) -> Result<Vec<VoteOption>, StorageError> {
        self.inner.list_by_session(session_id).await
    }

    async fn update(
        &self,
        option: &VoteOption,
        expected_votes: i64,
    ) -> Result<Option<VoteOption>, StorageError> {
        if self.conflicted.swap(true, Ordering::SeqCst) {
            return OptionStore::update(&self.inner, option, expected_votes).await;
        }
        match self.scope {
            LockScope::Global => self.global.upsert(true).await?,
            LockScope::Session(id) => {
                let mut session = SessionStore::get(&*self.sessions, id)
                    .await?
                    .expect("session seeded by the test");
                session.locked = true;
                SessionStore::update(&*self.sessions, &session).await?;
            }
        }
        Ok(None)
    }
}

#[rstest]
#[case(LockScope::Global)]
#[case(LockScope::Session(SessionId(1)))]
#[tokio::test]
async fn lock_set_during_retry_stops_the_vote(#[case] scope: LockScope) {
    let sessions = Arc::new(MemorySessionStore::new());
    sessions.insert(session(1, false)).await;
    let global = Arc::new(MemoryLockStore::new());
    let options = Arc::new(LockDuringConflict {
        inner: MemoryOptionStore::new(),
        sessions: Arc::clone(&sessions),
        global: Arc::clone(&global),
        scope,
        conflicted: AtomicBool::new(false),
    });
    let engine = VotingEngine::new(options, Arc::clone(&sessions), global);

    let option = engine
        .add_option("Ramen Ya", "https://ramen.example", Some(SessionId(1)))
        .await
        .unwrap();

    let err = engine.vote(option.id, 1).await.unwrap_err();
    assert_eq!(err.lock_scope(), Some(scope));
    assert_eq!(engine.option(option.id).await.unwrap().votes, 0);
}
