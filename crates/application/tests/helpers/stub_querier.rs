use async_trait::async_trait;
use ferrous_recon_application::ports::DnsQuerier;
use ferrous_recon_domain::{
    AnswerData, AnswerRecord, DnsAnswer, QueryOutcome, QueryTarget, RecordType, ResolverConfig,
    ResponseCode,
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned-answer resolver. Unknown names get `Empty` unless a catch-all A
/// address is configured.
#[derive(Default)]
pub struct StubQuerier {
    responses: Mutex<HashMap<(String, RecordType), QueryOutcome>>,
    transfers: Mutex<HashMap<IpAddr, QueryOutcome>>,
    catch_all_a: Mutex<Option<Ipv4Addr>>,
    queries: Mutex<Vec<QueryTarget>>,
    query_count: AtomicU64,
    delay: Mutex<Option<Duration>>,
    worst_case: Mutex<Option<Duration>>,
}

impl StubQuerier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, name: &str, record_type: RecordType, outcome: QueryOutcome) {
        self.responses
            .lock()
            .unwrap()
            .insert((name.to_string(), record_type), outcome);
    }

    pub fn respond_transfer(&self, server: IpAddr, outcome: QueryOutcome) {
        self.transfers.lock().unwrap().insert(server, outcome);
    }

    /// Answer every A query not otherwise configured with `address`.
    pub fn answer_every_a(&self, address: Ipv4Addr) {
        *self.catch_all_a.lock().unwrap() = Some(address);
    }

    /// Sleep this long before answering any query.
    pub fn delay_answers(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Report this as the worst-case query time instead of the config's.
    pub fn set_worst_case(&self, worst_case: Duration) {
        *self.worst_case.lock().unwrap() = Some(worst_case);
    }

    pub fn query_count(&self) -> u64 {
        self.query_count.load(Ordering::SeqCst)
    }

    pub fn queried_names(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

#[async_trait]
impl DnsQuerier for StubQuerier {
    async fn query(&self, target: &QueryTarget, _config: &ResolverConfig) -> QueryOutcome {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(target.clone());

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let key = (target.name.to_string(), target.record_type);
        if let Some(outcome) = self.responses.lock().unwrap().get(&key) {
            return outcome.clone();
        }

        match (*self.catch_all_a.lock().unwrap(), target.record_type) {
            (Some(address), RecordType::A) => a_answer(&target.name, &[address]),
            _ => QueryOutcome::Empty,
        }
    }

    async fn worst_case(&self, config: &ResolverConfig) -> Duration {
        let worst_case = *self.worst_case.lock().unwrap();
        worst_case.unwrap_or_else(|| config.worst_case_duration())
    }

    async fn transfer_zone(
        &self,
        _domain: &str,
        servers: &[IpAddr],
        _config: &ResolverConfig,
    ) -> QueryOutcome {
        let transfers = self.transfers.lock().unwrap();
        for server in servers {
            if let Some(outcome) = transfers.get(server) {
                return outcome.clone();
            }
        }
        QueryOutcome::Empty
    }
}

fn answer(name: &str, data: Vec<AnswerData>) -> QueryOutcome {
    let records = data
        .into_iter()
        .map(|d| AnswerRecord::new(format!("{}.", name), 300, d))
        .collect();
    QueryOutcome::from_answer(DnsAnswer::new(ResponseCode::NoError, records))
}

pub fn a_answer(name: &str, addresses: &[Ipv4Addr]) -> QueryOutcome {
    answer(
        name,
        addresses
            .iter()
            .map(|address| AnswerData::A { address: *address })
            .collect(),
    )
}

pub fn ns_answer(name: &str, nameservers: &[&str]) -> QueryOutcome {
    answer(
        name,
        nameservers
            .iter()
            .map(|ns| AnswerData::Ns {
                nsdname: ns.to_string(),
            })
            .collect(),
    )
}

pub fn srv_answer(name: &str, target: &str, port: u16, priority: u16) -> QueryOutcome {
    answer(
        name,
        vec![AnswerData::Srv {
            priority,
            weight: 0,
            port,
            target: target.to_string(),
        }],
    )
}
