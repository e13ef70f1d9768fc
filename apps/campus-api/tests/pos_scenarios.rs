//! End-to-end scenarios through the service layer.
//!
//! Each test gets its own database (in memory, or a temp file for the
//! races), cleared before and after the scenario the way an acceptance
//! suite resets shared state.

use campus_api::{AdminService, PosService, ServiceError};
use campus_core::{CampusType, PointOfSale, PosInput, PosType, ValidationRules};
use campus_db::{Database, DbConfig};
use std::time::Duration;

struct Scenario {
    pos: PosService,
    admin: AdminService,
}

impl Scenario {
    async fn start() -> Self {
        Self::with_config(DbConfig::in_memory()).await
    }

    async fn with_config(config: DbConfig) -> Self {
        let db = Database::new(config).await.unwrap();
        let scenario = Scenario {
            pos: PosService::new(db.points_of_sale(), ValidationRules::default()),
            admin: AdminService::new(db.points_of_sale()),
        };
        scenario.admin.clear().await.unwrap();
        scenario
    }

    async fn finish(self) {
        self.admin.clear().await.unwrap();
        assert!(self.pos.list().await.unwrap().is_empty());
    }
}

fn input(name: &str, pos_type: &str, campus: &str) -> PosInput {
    PosInput {
        name: name.to_string(),
        description: String::new(),
        pos_type: pos_type.to_string(),
        campus: campus.to_string(),
        street: "Im Neuenheimer Feld".to_string(),
        house_number: "304".to_string(),
        postal_code: 69120,
        city: "Heidelberg".to_string(),
        ..PosInput::default()
    }
}

fn central_cafe() -> PosInput {
    input("Central Café", "CAFE", "NORTH")
}

fn lib_kiosk() -> PosInput {
    input("Lib Kiosk", "KIOSK", "SOUTH")
}

fn names(list: &[PointOfSale]) -> Vec<&str> {
    list.iter().map(|p| p.name.as_str()).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn create_then_list() {
    let s = Scenario::start().await;

    s.pos.create(&central_cafe()).await.unwrap();
    s.pos.create(&lib_kiosk()).await.unwrap();

    let all = s.pos.list().await.unwrap();
    assert_eq!(names(&all), ["Central Café", "Lib Kiosk"]);
    assert_eq!(all[0].pos_type, PosType::Cafe);
    assert_eq!(all[0].campus, CampusType::North);
    assert_eq!(all[1].pos_type, PosType::Kiosk);
    assert_eq!(all[1].campus, CampusType::South);
    assert_ne!(all[0].id, all[1].id);
    for pos in &all {
        assert_eq!(pos.created_at, pos.updated_at);
    }

    s.finish().await;
}

#[tokio::test]
async fn update_description() {
    let s = Scenario::start().await;
    let cafe = s.pos.create(&central_cafe()).await.unwrap();
    s.pos.create(&lib_kiosk()).await.unwrap();

    let mut changed = PosInput::from(&cafe);
    changed.description = "Now open till 9pm".to_string();
    s.pos.update(cafe.id, &changed).await.unwrap();

    let after = s.pos.get_by_name("Central Café").await.unwrap();
    assert_eq!(after.description, "Now open till 9pm");
    assert_eq!(after.id, cafe.id);
    assert_eq!(after.created_at, cafe.created_at);
    assert!(after.updated_at >= cafe.updated_at);
    assert_eq!(after.name, cafe.name);
    assert_eq!(after.pos_type, cafe.pos_type);
    assert_eq!(after.campus, cafe.campus);
    assert_eq!(after.street, cafe.street);
    assert_eq!(after.house_number, cafe.house_number);
    assert_eq!(after.postal_code, cafe.postal_code);
    assert_eq!(after.city, cafe.city);

    s.finish().await;
}

#[tokio::test]
async fn duplicate_rejection() {
    let s = Scenario::start().await;
    let original = s.pos.create(&central_cafe()).await.unwrap();

    let mut second = central_cafe();
    second.description = "A different café, same name".to_string();
    let err = s.pos.create(&second).await.unwrap_err();

    assert!(matches!(err, ServiceError::DuplicateName { ref name } if name == "Central Café"));
    let all = s.pos.list().await.unwrap();
    assert_eq!(all, vec![original]);

    s.finish().await;
}

// =============================================================================
// Properties
// =============================================================================

#[tokio::test]
async fn list_preserves_creation_order_across_updates() {
    let s = Scenario::start().await;
    let mut created = Vec::new();
    for name in ["Zeta Bakery", "Alpha Vending", "Mid Cafeteria"] {
        created.push(s.pos.create(&input(name, "BAKERY", "INF")).await.unwrap());
    }

    // Touch the first and last; positions must not move
    for pos in [&created[2], &created[0]] {
        let mut changed = PosInput::from(pos);
        changed.city = "Mannheim".to_string();
        s.pos.update(pos.id, &changed).await.unwrap();
    }

    let all = s.pos.list().await.unwrap();
    assert_eq!(names(&all), ["Zeta Bakery", "Alpha Vending", "Mid Cafeteria"]);

    s.finish().await;
}

#[tokio::test]
async fn update_identity() {
    let s = Scenario::start().await;
    let cafe = s.pos.create(&central_cafe()).await.unwrap();

    let mut draft = input("Café Botanik", "CAFETERIA", "BERGHEIM");
    draft.street = "Bergheimer Str.".to_string();
    draft.house_number = "58a".to_string();
    draft.postal_code = 69115;
    draft.description = "Renamed and moved".to_string();

    let updated = s.pos.update(cafe.id, &draft).await.unwrap();
    let found = s.pos.get_by_name("Café Botanik").await.unwrap();

    assert_eq!(found, updated);
    assert_eq!(PosInput { id: None, ..PosInput::from(&found) }, draft);
    assert!(found.updated_at >= cafe.updated_at);
    assert!(matches!(
        s.pos.get_by_name("Central Café").await,
        Err(ServiceError::NotFound { .. })
    ));

    s.finish().await;
}

#[tokio::test]
async fn rename_onto_other_record_conflicts() {
    let s = Scenario::start().await;
    s.pos.create(&central_cafe()).await.unwrap();
    let kiosk = s.pos.create(&lib_kiosk()).await.unwrap();

    let mut renamed = PosInput::from(&kiosk);
    renamed.name = "Central Café".to_string();

    assert!(matches!(
        s.pos.update(kiosk.id, &renamed).await,
        Err(ServiceError::DuplicateName { .. })
    ));
    assert_eq!(s.pos.get_by_name("Lib Kiosk").await.unwrap(), kiosk);

    s.finish().await;
}

#[tokio::test]
async fn idempotent_clear() {
    let s = Scenario::start().await;
    let first = s.pos.create(&central_cafe()).await.unwrap();
    s.pos.create(&lib_kiosk()).await.unwrap();

    assert_eq!(s.admin.clear().await.unwrap(), 2);
    assert!(s.pos.list().await.unwrap().is_empty());
    assert_eq!(s.admin.clear().await.unwrap(), 0);
    assert!(s.pos.list().await.unwrap().is_empty());

    // Fresh-store behaviour, but ids keep counting
    let again = s.pos.create(&central_cafe()).await.unwrap();
    assert!(again.id > first.id);
    assert_eq!(s.pos.list().await.unwrap(), vec![again]);

    s.finish().await;
}

#[tokio::test]
async fn validation_errors_are_distinct() {
    let s = Scenario::start().await;

    let cases = [
        input("", "CAFE", "NORTH"),
        input("Central Café", "PUB", "NORTH"),
        input("Central Café", "cafe", "NORTH"),
        input("Central Café", "CAFE", "EAST"),
        PosInput {
            postal_code: -69120,
            ..central_cafe()
        },
        PosInput {
            postal_code: 123,
            ..central_cafe()
        },
        PosInput {
            house_number: "12; DROP".to_string(),
            ..central_cafe()
        },
    ];

    for case in &cases {
        let err = s.pos.create(case).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)), "{case:?} gave {err:?}");
    }
    assert!(s.pos.list().await.unwrap().is_empty());

    s.finish().await;
}

#[tokio::test]
async fn updated_at_never_moves_backwards() {
    let s = Scenario::start().await;
    let cafe = s.pos.create(&central_cafe()).await.unwrap();

    let mut last = cafe.updated_at;
    for i in 0..5 {
        let mut changed = PosInput::from(&cafe);
        changed.description = format!("revision {i}");
        let updated = s.pos.update(cafe.id, &changed).await.unwrap();
        assert!(updated.updated_at >= last);
        assert_eq!(updated.created_at, cafe.created_at);
        last = updated.updated_at;
    }

    s.finish().await;
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_creates_on_one_name() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("race.db"))
        .max_connections(4)
        .busy_timeout(Duration::from_secs(10));
    let s = Scenario::with_config(config).await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let pos = s.pos.clone();
        handles.push(tokio::spawn(async move {
            let mut draft = central_cafe();
            draft.description = format!("writer {i}");
            pos.create(&draft).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(ServiceError::DuplicateName { .. }) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(s.pos.list().await.unwrap().len(), 1);

    s.finish().await;
}

#[tokio::test]
async fn case_insensitive_names_collide() {
    let config = DbConfig::in_memory().name_matching(campus_core::NameMatching::CaseInsensitive);
    let s = Scenario::with_config(config).await;
    s.pos.create(&central_cafe()).await.unwrap();

    let shouting = input("CENTRAL CAFÉ", "CAFE", "NORTH");
    assert!(matches!(
        s.pos.create(&shouting).await,
        Err(ServiceError::DuplicateName { .. })
    ));
    assert_eq!(
        s.pos.get_by_name("central café").await.unwrap().name,
        "Central Café"
    );

    s.finish().await;
}

async fn file_scenario(dir: &tempfile::TempDir) -> Scenario {
    let config = DbConfig::new(dir.path().join("race.db"))
        .max_connections(4)
        .busy_timeout(Duration::from_secs(10));
    Scenario::with_config(config).await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_renames_onto_one_name() {
    let dir = tempfile::tempdir().unwrap();
    let s = file_scenario(&dir).await;
    let cafe = s.pos.create(&central_cafe()).await.unwrap();
    let kiosk = s.pos.create(&lib_kiosk()).await.unwrap();

    let rename = |pos: &PointOfSale| {
        let service = s.pos.clone();
        let id = pos.id;
        let mut draft = PosInput::from(pos);
        draft.name = "Café Botanik".to_string();
        tokio::spawn(async move { service.update(id, &draft).await })
    };
    let (a, b) = (rename(&cafe), rename(&kiosk));
    let (ra, rb) = (a.await.unwrap(), b.await.unwrap());

    let (loser, lost) = match (&ra, &rb) {
        (Ok(_), Err(e)) => (&kiosk, e),
        (Err(e), Ok(_)) => (&cafe, e),
        other => panic!("expected exactly one winner, got {other:?}"),
    };
    assert!(matches!(lost, ServiceError::DuplicateName { .. }), "{lost:?}");
    assert_eq!(&s.pos.get_by_id(loser.id).await.unwrap(), loser);
    assert_eq!(s.pos.list().await.unwrap().len(), 2);

    s.finish().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_create_against_rename() {
    let dir = tempfile::tempdir().unwrap();
    let s = file_scenario(&dir).await;
    let kiosk = s.pos.create(&lib_kiosk()).await.unwrap();

    let creator = s.pos.clone();
    let create = tokio::spawn(async move { creator.create(&central_cafe()).await });

    let renamer = s.pos.clone();
    let kiosk_id = kiosk.id;
    let mut renamed = PosInput::from(&kiosk);
    renamed.name = "Central Café".to_string();
    let rename = tokio::spawn(async move { renamer.update(kiosk_id, &renamed).await });

    let (created, updated) = (create.await.unwrap(), rename.await.unwrap());

    match (&created, &updated) {
        (Ok(_), Err(ServiceError::DuplicateName { .. })) => {
            assert_eq!(s.pos.get_by_id(kiosk.id).await.unwrap(), kiosk);
            assert_eq!(s.pos.list().await.unwrap().len(), 2);
        }
        (Err(ServiceError::DuplicateName { .. }), Ok(pos)) => {
            assert_eq!(pos.id, kiosk.id);
            assert_eq!(s.pos.list().await.unwrap().len(), 1);
        }
        other => panic!("expected exactly one winner, got {other:?}"),
    }
    let holder = s.pos.get_by_name("Central Café").await.unwrap();
    assert_eq!(
        s.pos
            .list()
            .await
            .unwrap()
            .iter()
            .filter(|p| p.name == holder.name)
            .count(),
        1
    );

    s.finish().await;
}
