mod helpers;

use ferrous_recon_application::services::PoolMetrics;
use ferrous_recon_application::use_cases::{
    BruteForceUseCase, DetectWildcardUseCase, LookupRecordsUseCase, ReverseSweepUseCase,
    SrvScanUseCase, TldScanUseCase,
};
use ferrous_recon_domain::{DomainError, FailureKind, QueryOutcome, RecordType};
use helpers::*;
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

fn values(result: &ferrous_recon_domain::EnumerationResult) -> HashSet<String> {
    result.iter().map(|r| r.value.clone()).collect()
}

#[tokio::test]
async fn test_brute_force_collects_hits_and_reports_one_failure() {
    let querier = StubQuerier::new();
    querier.respond(
        "www.example.com",
        RecordType::A,
        a_answer("www.example.com", &[Ipv4Addr::new(1, 2, 3, 4)]),
    );
    querier.respond(
        "mail.example.com",
        RecordType::A,
        a_answer("mail.example.com", &[Ipv4Addr::new(1, 2, 3, 5)]),
    );
    querier.respond(
        "bogus123.example.com",
        RecordType::A,
        QueryOutcome::failure(FailureKind::Timeout, "no reply"),
    );
    let sink = RecordingSink::new();
    let store = MemoryFindingsStore::new();
    let use_case =
        BruteForceUseCase::new(lookup_with(querier.clone(), sink.clone(), store.clone()));

    let result = use_case
        .execute("example.com", ["www", "mail", "bogus123"], 2)
        .await
        .expect("two hosts resolve");

    assert_eq!(
        values(&result),
        HashSet::from(["1.2.3.4".to_string(), "1.2.3.5".to_string()])
    );
    assert_eq!(sink.errors().len(), 1);
    assert!(sink.errors()[0].contains("bogus123.example.com"));
    assert_eq!(store.findings().await.len(), 2);
}

#[tokio::test]
async fn test_brute_force_empty_wordlist_starts_no_workers() {
    let querier = StubQuerier::new();
    let metrics = Arc::new(PoolMetrics::default());
    let use_case = BruteForceUseCase::new(lookup_with(
        querier.clone(),
        RecordingSink::new(),
        MemoryFindingsStore::new(),
    ))
    .with_metrics(Arc::clone(&metrics));

    let empty: Vec<String> = Vec::new();
    assert!(use_case.execute("example.com", empty, 4).await.is_none());
    assert!(use_case.execute("example.com", ["", "   "], 4).await.is_none());

    assert_eq!(metrics.workers_started(), 0);
    assert_eq!(querier.query_count(), 0);
}

#[tokio::test]
async fn test_brute_force_deduplicates_shared_addresses() {
    let querier = StubQuerier::new();
    querier.answer_every_a(Ipv4Addr::new(10, 0, 0, 1));
    let use_case = BruteForceUseCase::new(lookup_with(
        querier,
        RecordingSink::new(),
        MemoryFindingsStore::new(),
    ));

    let result = use_case
        .execute("example.com", ["a", "b", "c"], 3)
        .await
        .expect("catch-all answers");

    assert_eq!(result.len(), 1);
}

#[tokio::test]
async fn test_brute_force_reports_query_past_deadline() {
    let querier = StubQuerier::new();
    querier.set_worst_case(Duration::ZERO);
    querier.delay_answers(Duration::from_millis(1500));
    querier.answer_every_a(Ipv4Addr::new(1, 2, 3, 4));
    let sink = RecordingSink::new();
    let metrics = Arc::new(PoolMetrics::default());
    let use_case = BruteForceUseCase::new(lookup_with(
        querier,
        sink.clone(),
        MemoryFindingsStore::new(),
    ))
    .with_metrics(Arc::clone(&metrics));

    assert!(use_case.execute("example.com", ["slow"], 1).await.is_none());

    let errors = sink.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("slow.example.com"));
    assert!(errors[0].contains(&FailureKind::Timeout.to_string()));
    assert_eq!(metrics.items_timed_out(), 0);
}

#[tokio::test]
async fn test_item_deadline_follows_querier_worst_case() {
    let querier = StubQuerier::new();
    querier.set_worst_case(Duration::from_secs(2));
    querier.delay_answers(Duration::from_millis(2500));
    querier.answer_every_a(Ipv4Addr::new(1, 2, 3, 4));
    let sink = RecordingSink::new();
    let lookup = lookup_with(querier, sink.clone(), MemoryFindingsStore::new());

    assert_eq!(lookup.query_deadline().await, Duration::from_secs(3));
    assert_eq!(lookup.item_deadline().await, Duration::from_secs(4));

    let result = BruteForceUseCase::new(lookup)
        .execute("example.com", ["slow"], 1)
        .await
        .expect("answer arrives before the deadline");

    assert_eq!(values(&result), HashSet::from(["1.2.3.4".to_string()]));
    assert!(sink.errors().is_empty());
}

#[tokio::test]
async fn test_srv_scan_returns_single_entry_mapping() {
    let querier = StubQuerier::new();
    querier.respond(
        "_ldap._tcp.example.com",
        RecordType::SRV,
        srv_answer("_ldap._tcp.example.com", "dc1.example.com.", 389, 0),
    );
    let store = MemoryFindingsStore::new();
    let use_case = SrvScanUseCase::new(lookup_with(
        querier.clone(),
        RecordingSink::new(),
        store.clone(),
    ));

    let report = use_case.execute("example.com").await.expect("one service");

    assert_eq!(report.len(), 1);
    let services = &report["_ldap._tcp.example.com"];
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].host, "dc1.example.com");
    assert_eq!(services[0].port, 389);
    assert_eq!(services[0].priority, 0);

    let kinds = store.kinds().await;
    assert_eq!(kinds, vec!["_ldap._tcp.example.com".to_string()]);
    assert_eq!(querier.query_count(), 37 * 3);
}

#[tokio::test]
async fn test_srv_scan_with_no_services_is_absent() {
    let use_case = SrvScanUseCase::new(lookup_with(
        StubQuerier::new(),
        RecordingSink::new(),
        MemoryFindingsStore::new(),
    ));

    assert!(use_case.execute("example.com").await.is_none());
}

#[tokio::test]
async fn test_wildcard_detected_when_everything_resolves() {
    let querier = StubQuerier::new();
    querier.answer_every_a(Ipv4Addr::new(1, 1, 1, 1));
    let sink = RecordingSink::new();
    let use_case = DetectWildcardUseCase::new(lookup_with(
        querier,
        sink.clone(),
        MemoryFindingsStore::new(),
    ));

    assert!(use_case.execute("example.com").await);
    assert_eq!(sink.warnings().len(), 1);
}

#[tokio::test]
async fn test_wildcard_absent_when_only_known_labels_resolve() {
    let querier = StubQuerier::new();
    querier.respond(
        "www.example.com",
        RecordType::A,
        a_answer("www.example.com", &[Ipv4Addr::new(1, 2, 3, 4)]),
    );
    let sink = RecordingSink::new();
    let use_case = DetectWildcardUseCase::new(lookup_with(
        querier.clone(),
        sink.clone(),
        MemoryFindingsStore::new(),
    ));

    assert!(!use_case.execute("example.com").await);
    assert!(sink.warnings().is_empty());

    let asked = querier.queried_names();
    assert_eq!(asked.len(), 1);
    let label = asked[0].trim_end_matches(".example.com");
    assert_eq!(label.len(), 16);
    assert!(label.chars().all(|c| c.is_ascii_alphabetic()));
}

#[tokio::test]
async fn test_reverse_sweep_without_range_is_input_error() {
    let sink = RecordingSink::new();
    let use_case = ReverseSweepUseCase::new(lookup_with(
        StubQuerier::new(),
        sink.clone(),
        MemoryFindingsStore::new(),
    ));

    let result = use_case.execute(None::<Vec<IpAddr>>, 4).await;

    assert!(matches!(result, Err(DomainError::InputError(_))));
    assert_eq!(sink.errors().len(), 1);
}

#[tokio::test]
async fn test_reverse_sweep_collects_ptr_names() {
    let querier = StubQuerier::new();
    let ptr = |name: &str| {
        QueryOutcome::from_answer(ferrous_recon_domain::DnsAnswer::new(
            ferrous_recon_domain::ResponseCode::NoError,
            vec![ferrous_recon_domain::AnswerRecord::new(
                "x.in-addr.arpa.",
                60,
                ferrous_recon_domain::AnswerData::Ptr {
                    ptrdname: name.to_string(),
                },
            )],
        ))
    };
    querier.respond("192.0.2.1", RecordType::PTR, ptr("gw.example.com."));
    querier.respond("192.0.2.2", RecordType::PTR, ptr("mail.example.com."));
    let metrics = Arc::new(PoolMetrics::default());
    let use_case = ReverseSweepUseCase::new(lookup_with(
        querier,
        RecordingSink::new(),
        MemoryFindingsStore::new(),
    ))
    .with_metrics(Arc::clone(&metrics));

    let range: Vec<IpAddr> = (1..=4)
        .map(|host| IpAddr::V4(Ipv4Addr::new(192, 0, 2, host)))
        .collect();
    let result = use_case
        .execute(Some(range), 2)
        .await
        .expect("range given")
        .expect("two names");

    assert_eq!(
        values(&result),
        HashSet::from(["gw.example.com.".to_string(), "mail.example.com.".to_string()])
    );
    assert_eq!(metrics.workers_started(), 2);

    let empty = use_case.execute(Some(Vec::<IpAddr>::new()), 2).await;
    assert!(matches!(empty, Ok(None)));
}

#[tokio::test]
async fn test_tld_scan_swaps_last_label() {
    let querier = StubQuerier::new();
    querier.respond(
        "example.org",
        RecordType::A,
        a_answer("example.org", &[Ipv4Addr::new(5, 6, 7, 8)]),
    );
    let sink = RecordingSink::new();
    let use_case = TldScanUseCase::new(lookup_with(
        querier.clone(),
        sink.clone(),
        MemoryFindingsStore::new(),
    ));

    let tlds = vec!["ORG".to_string(), " net ".to_string(), "".to_string()];
    let result = use_case
        .execute("example.com", Some(tlds), 4)
        .await
        .expect("org resolves");

    assert_eq!(values(&result), HashSet::from(["5.6.7.8".to_string()]));
    let asked: HashSet<String> = querier.queried_names().into_iter().collect();
    assert_eq!(
        asked,
        HashSet::from(["example.org".to_string(), "example.net".to_string()])
    );
}

#[tokio::test]
async fn test_tld_scan_rejects_single_label_domain() {
    let querier = StubQuerier::new();
    let sink = RecordingSink::new();
    let use_case = TldScanUseCase::new(lookup_with(
        querier.clone(),
        sink.clone(),
        MemoryFindingsStore::new(),
    ));

    assert!(use_case.execute("localhost", None, 4).await.is_none());
    assert_eq!(sink.errors().len(), 1);
    assert_eq!(querier.query_count(), 0);

    assert!(use_case.execute("example.com", Some(Vec::new()), 4).await.is_none());
}

#[tokio::test]
async fn test_lookup_persists_under_type_kind() {
    let querier = StubQuerier::new();
    querier.respond(
        "example.com",
        RecordType::NS,
        ns_answer("example.com", &["ns1.example.com.", "ns2.example.com."]),
    );
    let store = MemoryFindingsStore::new();
    let use_case =
        LookupRecordsUseCase::new(lookup_with(querier, RecordingSink::new(), store.clone()));

    let result = use_case
        .execute("example.com", RecordType::NS)
        .await
        .expect("two nameservers");

    assert_eq!(result.len(), 2);
    assert_eq!(store.kinds().await, vec!["DNS NS records".to_string()]);
    assert!(use_case.execute("example.com", RecordType::MX).await.is_none());
}

#[tokio::test]
async fn test_store_failure_does_not_abort_lookup() {
    let querier = StubQuerier::new();
    querier.respond(
        "example.com",
        RecordType::A,
        a_answer("example.com", &[Ipv4Addr::new(9, 9, 9, 9)]),
    );
    let store = MemoryFindingsStore::new();
    store.set_should_fail(true).await;
    let use_case = LookupRecordsUseCase::new(lookup_with(querier, RecordingSink::new(), store));

    let result = use_case.execute("example.com", RecordType::A).await;

    assert!(result.is_some());
}

#[tokio::test]
async fn test_disabled_persistence_records_nothing() {
    let querier = StubQuerier::new();
    querier.respond(
        "example.com",
        RecordType::A,
        a_answer("example.com", &[Ipv4Addr::new(9, 9, 9, 9)]),
    );
    let store = MemoryFindingsStore::new();
    let lookup = lookup_with(querier, RecordingSink::new(), store.clone()).with_persistence(false);

    assert!(LookupRecordsUseCase::new(lookup)
        .execute("example.com", RecordType::A)
        .await
        .is_some());
    assert!(store.findings().await.is_empty());
}
