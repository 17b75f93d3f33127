// tests/dashboard_tests.rs

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use qureplus_common::models::{AnalysisRecord, NewAnalysis, UserRecord};
use qureplus_common::traits::LeadRepository;
use qureplus_core::Error;
use qureplus_core::services::DashboardService;
use qureplus_core::test_utils::InMemoryLeadRepository;
use uuid::Uuid;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
}

fn user(name: &str, created: DateTime<Utc>, email: Option<&str>) -> UserRecord {
    UserRecord {
        id: Uuid::new_v4(),
        full_name: name.into(),
        age: 45,
        city: "Coimbatore".into(),
        mobile: "9876543210".into(),
        email: email.map(str::to_string),
        created_at: created,
    }
}

fn analysis(user_id: Uuid, probability: f64, when: DateTime<Utc>) -> AnalysisRecord {
    AnalysisRecord {
        id: Uuid::new_v4(),
        user_id,
        image_name: None,
        image_url: None,
        probability: Some(probability),
        stage: Some("Stage 1 – Spider Veins".into()),
        reasoning: Some("Fine red lines.".into()),
        created_at: when,
    }
}

fn seeded() -> (Arc<InMemoryLeadRepository>, UserRecord, UserRecord) {
    let repo = Arc::new(InMemoryLeadRepository::new());
    let older = user("Ravi Kumar", at(2025, 1, 10), None);
    let newer = user("Anitha, R", at(2025, 3, 1), Some("anitha@example.com"));
    repo.seed_user(older.clone());
    repo.seed_user(newer.clone());
    repo.seed_analysis(analysis(newer.id, 60.0, at(2025, 3, 2)));
    repo.seed_analysis(analysis(newer.id, 70.0, at(2025, 3, 5)));
    (repo, older, newer)
}

#[tokio::test]
async fn overview_computes_stats_from_summaries() {
    let (repo, older, newer) = seeded();
    let service = DashboardService::new(Some(repo));

    let overview = service.overview(at(2025, 3, 20)).await.unwrap();

    assert_eq!(overview.stats.total_users, 2);
    assert_eq!(overview.stats.total_analyses, 2);
    // (65 + 0) / 2
    assert_eq!(overview.stats.avg_probability, 32.5);
    assert_eq!(overview.stats.active_this_month, 1);
    assert_eq!(overview.users[0].id, newer.id);
    assert_eq!(overview.users[1].id, older.id);
}

#[tokio::test]
async fn activity_from_another_year_is_not_this_month() {
    let (repo, _, _) = seeded();
    let service = DashboardService::new(Some(repo));

    let overview = service.overview(at(2026, 3, 20)).await.unwrap();
    assert_eq!(overview.stats.active_this_month, 0);
}

#[tokio::test]
async fn user_detail_lists_history_newest_first() {
    let (repo, _, newer) = seeded();
    let service = DashboardService::new(Some(repo));

    let detail = service.user_detail(newer.id).await.unwrap();
    assert_eq!(detail.user.full_name, "Anitha, R");
    let probabilities: Vec<_> = detail.analyses.iter().map(|a| a.probability).collect();
    assert_eq!(probabilities, vec![Some(70.0), Some(60.0)]);

    let err = service.user_detail(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn csv_export_has_header_and_one_line_per_user() {
    let (repo, _, _) = seeded();
    let service = DashboardService::new(Some(repo));

    let export = service.export_csv(at(2025, 3, 20)).await.unwrap();
    assert_eq!(export.filename, "qureplus-data-2025-03-20.csv");

    let lines: Vec<&str> = export.content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Name,Age,City,Mobile,Email,Total Analyses,Avg Probability,Last Analysis"
    );
    assert_eq!(
        lines[1],
        "\"Anitha, R\",45,Coimbatore,9876543210,anitha@example.com,2,65.0,3/5/2025"
    );
    assert_eq!(lines[2], "Ravi Kumar,45,Coimbatore,9876543210,,0,0,Never");
}

#[tokio::test]
async fn empty_dashboard_has_zero_average() {
    let service = DashboardService::new(Some(Arc::new(InMemoryLeadRepository::new())));
    let overview = service.overview(Utc::now()).await.unwrap();
    assert_eq!(overview.stats.total_users, 0);
    assert_eq!(overview.stats.avg_probability, 0.0);
    assert!(overview.users.is_empty());
}

#[tokio::test]
async fn repository_errors_are_surfaced() {
    let (repo, _, newer) = seeded();
    repo.set_fail_reads(true);
    let service = DashboardService::new(Some(repo));

    assert!(matches!(
        service.overview(Utc::now()).await,
        Err(Error::Backend(_))
    ));
    assert!(matches!(
        service.user_detail(newer.id).await,
        Err(Error::Backend(_))
    ));
    assert!(matches!(
        service.export_csv(Utc::now()).await,
        Err(Error::Backend(_))
    ));
}

#[tokio::test]
async fn unconfigured_backend_is_unavailable() {
    let service = DashboardService::new(None);
    assert!(matches!(
        service.overview(Utc::now()).await,
        Err(Error::BackendUnavailable(_))
    ));
    assert!(matches!(
        service.user_detail(Uuid::new_v4()).await,
        Err(Error::BackendUnavailable(_))
    ));
    assert!(matches!(
        service.export_csv(Utc::now()).await,
        Err(Error::BackendUnavailable(_))
    ));
}

#[tokio::test]
async fn analysis_for_unknown_user_is_not_stored() {
    let repo = InMemoryLeadRepository::new();
    let orphan = NewAnalysis {
        user_id: Uuid::new_v4(),
        probability: 40.0,
        stage: "Stage 1 – Spider Veins".into(),
        reasoning: "Fine red lines.".into(),
        image_name: None,
        image_url: None,
    };

    let err = repo.create_analysis(&orphan, None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(repo.analyses().is_empty());
}
