use lotto_ticketing::{
    DrawState, NUMBERS_PER_SET, NumberGenerator, NumberRange, NumberSource, TicketStore,
    TicketingError, TicketingUseCase,
};
use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Hands out predefined sets in order.
struct ScriptedNumbers {
    sets: Mutex<VecDeque<Vec<u32>>>,
}

impl ScriptedNumbers {
    fn new(sets: Vec<Vec<u32>>) -> Self {
        Self {
            sets: Mutex::new(sets.into()),
        }
    }
}

impl NumberSource for ScriptedNumbers {
    fn next_set(&self) -> Vec<u32> {
        self.sets
            .lock()
            .unwrap()
            .pop_front()
            .expect("script ran out of number sets")
    }
}

fn use_case_with(dir: &TempDir, numbers: Arc<dyn NumberSource>) -> TicketingUseCase {
    let store = TicketStore::open(dir.path().join("lottery.db")).unwrap();
    TicketingUseCase::new(store, Arc::new(DrawState::new()), numbers)
}

fn random_use_case(dir: &TempDir) -> TicketingUseCase {
    use_case_with(dir, Arc::new(NumberGenerator::new(NumberRange::default())))
}

#[tokio::test]
async fn alice_matches_three_numbers() {
    let dir = TempDir::new().unwrap();
    let use_case = use_case_with(
        &dir,
        Arc::new(ScriptedNumbers::new(vec![
            vec![3, 7, 12, 19, 25, 41],
            vec![7, 19, 25, 30, 44, 2],
        ])),
    );

    let receipt = use_case.purchase_ticket("alice").await.unwrap();
    assert_eq!(receipt.ticket_id, 1);
    assert_eq!(receipt.numbers, vec![3, 7, 12, 19, 25, 41]);

    let winning = use_case.draw_winning_numbers().await;
    assert_eq!(winning, vec![7, 19, 25, 30, 44, 2]);

    let report = use_case.check_result(1).await.unwrap();
    let matched: BTreeSet<u32> = report.matched_numbers.iter().copied().collect();
    assert_eq!(matched, BTreeSet::from([7, 19, 25]));
    assert_eq!(report.match_count, 3);
    assert_eq!(report.ticket_numbers, receipt.numbers);
    assert_eq!(report.winning_numbers, winning);
}

#[tokio::test]
async fn purchases_return_six_numbers_in_range() {
    let dir = TempDir::new().unwrap();
    let use_case = random_use_case(&dir);

    for i in 0..20 {
        let receipt = use_case.purchase_ticket(&format!("player-{i}")).await.unwrap();
        assert_eq!(receipt.numbers.len(), NUMBERS_PER_SET);
        assert!(receipt.numbers.iter().all(|n| (1..=49).contains(n)));
    }
}

#[tokio::test]
async fn stored_ticket_matches_receipt() {
    let dir = TempDir::new().unwrap();
    let use_case = random_use_case(&dir);

    let receipt = use_case.purchase_ticket("bob").await.unwrap();
    let ticket = use_case.get_ticket(receipt.ticket_id).await.unwrap();

    assert_eq!(ticket.id, receipt.ticket_id);
    assert_eq!(ticket.user_name, "bob");
    assert_eq!(ticket.numbers, receipt.numbers);
}

#[tokio::test]
async fn owner_name_is_free_text() {
    let dir = TempDir::new().unwrap();
    let use_case = random_use_case(&dir);

    for name in ["", "bob", "bob", "Robert'); DROP TABLE tickets;--", "名前"] {
        let receipt = use_case.purchase_ticket(name).await.unwrap();
        assert_eq!(use_case.get_ticket(receipt.ticket_id).await.unwrap().user_name, name);
    }
}

#[tokio::test]
async fn unknown_ticket_is_not_found() {
    let dir = TempDir::new().unwrap();
    let use_case = random_use_case(&dir);

    let err = use_case.check_result(999).await.unwrap_err();
    assert!(matches!(err, TicketingError::TicketNotFound(999)));

    use_case.draw_winning_numbers().await;
    assert!(use_case.check_result(-5).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn no_matches_before_first_draw() {
    let dir = TempDir::new().unwrap();
    let use_case = random_use_case(&dir);

    let receipt = use_case.purchase_ticket("carol").await.unwrap();
    let report = use_case.check_result(receipt.ticket_id).await.unwrap();

    assert!(report.winning_numbers.is_empty());
    assert!(report.matched_numbers.is_empty());
    assert_eq!(report.match_count, 0);
}

#[tokio::test]
async fn match_count_is_size_of_intersection() {
    let dir = TempDir::new().unwrap();
    let use_case = random_use_case(&dir);

    let receipt = use_case.purchase_ticket("dave").await.unwrap();
    for _ in 0..10 {
        let winning = use_case.draw_winning_numbers().await;
        let report = use_case.check_result(receipt.ticket_id).await.unwrap();

        let ticket: BTreeSet<u32> = receipt.numbers.iter().copied().collect();
        let drawn: BTreeSet<u32> = winning.iter().copied().collect();
        let expected: Vec<u32> = ticket.intersection(&drawn).copied().collect();

        assert_eq!(report.winning_numbers, winning);
        assert_eq!(report.matched_numbers, expected);
        assert_eq!(report.match_count, expected.len());
    }
}

#[tokio::test]
async fn only_latest_draw_is_visible() {
    let dir = TempDir::new().unwrap();
    let use_case = use_case_with(
        &dir,
        Arc::new(ScriptedNumbers::new(vec![
            vec![1, 2, 3, 4, 5, 6],
            vec![1, 2, 3, 4, 5, 6],
            vec![10, 20, 30, 40, 45, 49],
        ])),
    );

    let receipt = use_case.purchase_ticket("erin").await.unwrap();
    use_case.draw_winning_numbers().await;
    assert_eq!(use_case.check_result(receipt.ticket_id).await.unwrap().match_count, 6);

    use_case.draw_winning_numbers().await;
    let report = use_case.check_result(receipt.ticket_id).await.unwrap();
    assert_eq!(report.winning_numbers, vec![10, 20, 30, 40, 45, 49]);
    assert_eq!(report.match_count, 0);
}

#[tokio::test]
async fn repeated_checks_are_identical() {
    let dir = TempDir::new().unwrap();
    let use_case = random_use_case(&dir);

    let receipt = use_case.purchase_ticket("frank").await.unwrap();
    use_case.draw_winning_numbers().await;

    let first = use_case.check_result(receipt.ticket_id).await.unwrap();
    let second = use_case.check_result(receipt.ticket_id).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn tickets_survive_restart_but_draw_does_not() {
    let dir = TempDir::new().unwrap();

    let receipt = {
        let use_case = random_use_case(&dir);
        let receipt = use_case.purchase_ticket("grace").await.unwrap();
        use_case.draw_winning_numbers().await;
        receipt
    };

    let restarted = random_use_case(&dir);
    let report = restarted.check_result(receipt.ticket_id).await.unwrap();
    assert_eq!(report.ticket_numbers, receipt.numbers);
    assert!(report.winning_numbers.is_empty());
    assert!(restarted.health().await.last_draw_at.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_purchases_get_unique_ids() {
    let dir = TempDir::new().unwrap();
    let use_case = random_use_case(&dir);

    let mut handles = Vec::new();
    for i in 0..200 {
        let use_case = use_case.clone();
        handles.push(tokio::spawn(async move {
            use_case.purchase_ticket(&format!("buyer-{i}")).await
        }));
    }

    let mut ids = BTreeSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap().ticket_id);
    }
    assert_eq!(ids.len(), 200);
    assert_eq!(ids.first(), Some(&1));
    assert_eq!(ids.last(), Some(&200));
}
