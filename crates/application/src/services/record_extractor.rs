use ferrous_recon_domain::{
    AnswerData, AnswerRecord, EnumerationResult, ExtractedRecord, QueryOutcome, QueryTarget,
    RecordType, SrvData,
};

/// Per-type filter and projection from a reply's answer section.
pub struct RecordExtractor;

impl RecordExtractor {
    /// Keeps only answers of the target's record type and projects the field
    /// that type is queried for. Values repeated within the reply are kept once;
    /// `Empty` and `Failure` outcomes yield nothing.
    pub fn extract(outcome: &QueryOutcome, target: &QueryTarget) -> Vec<ExtractedRecord> {
        let mut unique = EnumerationResult::new();
        for answer in outcome.answers() {
            if let Some(record) = Self::project(answer, target) {
                unique.push(record);
            }
        }
        unique.into_records()
    }

    fn project(answer: &AnswerRecord, target: &QueryTarget) -> Option<ExtractedRecord> {
        let source = target.name.as_ref();
        let value = match (&answer.data, target.record_type) {
            (AnswerData::A { address }, RecordType::A) => address.to_string(),
            (AnswerData::Cname { cname }, RecordType::CNAME) => cname.clone(),
            (AnswerData::Mx { exchange, .. }, RecordType::MX) => exchange.clone(),
            (AnswerData::Ns { nsdname }, RecordType::NS) => nsdname.clone(),
            (AnswerData::Ptr { ptrdname }, RecordType::PTR) => ptrdname.clone(),
            (AnswerData::Soa { mname, .. }, RecordType::SOA) => mname.clone(),
            (AnswerData::Txt { text }, RecordType::TXT) => text.clone(),
            (
                AnswerData::Srv {
                    priority,
                    weight,
                    port,
                    target: host,
                },
                RecordType::SRV,
            ) => {
                let data = SrvData {
                    host: host.trim_end_matches('.').to_string(),
                    port: *port,
                    priority: *priority,
                    weight: *weight,
                };
                return Some(ExtractedRecord::srv(source, data));
            }
            _ => return None,
        };

        Some(ExtractedRecord::new(source, target.record_type, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_recon_domain::{DnsAnswer, FailureKind, ResponseCode};
    use std::net::Ipv4Addr;

    fn success(answers: Vec<AnswerData>) -> QueryOutcome {
        let records = answers
            .into_iter()
            .map(|data| AnswerRecord::new("example.com.", 300, data))
            .collect();
        QueryOutcome::from_answer(DnsAnswer::new(ResponseCode::NoError, records))
    }

    #[test]
    fn test_a_query_drops_cname_answers() {
        let outcome = success(vec![
            AnswerData::Cname {
                cname: "edge.example.net.".to_string(),
            },
            AnswerData::A {
                address: Ipv4Addr::new(1, 2, 3, 4),
            },
        ]);
        let target = QueryTarget::new("www.example.com", RecordType::A);

        let records = RecordExtractor::extract(&outcome, &target);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "1.2.3.4");
        assert_eq!(records[0].record_type, RecordType::A);
        assert_eq!(records[0].source_name, "www.example.com");
    }

    #[test]
    fn test_duplicate_values_collapse() {
        let outcome = success(vec![
            AnswerData::A {
                address: Ipv4Addr::new(1, 2, 3, 4),
            },
            AnswerData::A {
                address: Ipv4Addr::new(1, 2, 3, 4),
            },
            AnswerData::A {
                address: Ipv4Addr::new(1, 2, 3, 5),
            },
        ]);
        let target = QueryTarget::new("example.com", RecordType::A);

        let values: Vec<String> = RecordExtractor::extract(&outcome, &target)
            .into_iter()
            .map(|r| r.value)
            .collect();

        assert_eq!(values, vec!["1.2.3.4", "1.2.3.5"]);
    }

    #[test]
    fn test_projected_fields() {
        let cases = [
            (
                RecordType::MX,
                AnswerData::Mx {
                    preference: 10,
                    exchange: "mx.example.com.".to_string(),
                },
                "mx.example.com.",
            ),
            (
                RecordType::SOA,
                AnswerData::Soa {
                    mname: "ns1.example.com.".to_string(),
                    rname: "hostmaster.example.com.".to_string(),
                    serial: 1,
                },
                "ns1.example.com.",
            ),
            (
                RecordType::TXT,
                AnswerData::Txt {
                    text: "v=spf1 -all".to_string(),
                },
                "v=spf1 -all",
            ),
            (
                RecordType::NS,
                AnswerData::Ns {
                    nsdname: "ns2.example.com.".to_string(),
                },
                "ns2.example.com.",
            ),
            (
                RecordType::PTR,
                AnswerData::Ptr {
                    ptrdname: "host.example.com.".to_string(),
                },
                "host.example.com.",
            ),
        ];

        for (record_type, data, expected) in cases {
            let target = QueryTarget::new("example.com", record_type);
            let records = RecordExtractor::extract(&success(vec![data]), &target);
            assert_eq!(records.len(), 1, "{}", record_type);
            assert_eq!(records[0].value, expected);
        }
    }

    fn mixed_answers() -> Vec<AnswerData> {
        vec![
            AnswerData::A {
                address: Ipv4Addr::new(1, 2, 3, 4),
            },
            AnswerData::Cname {
                cname: "alias.example.com.".to_string(),
            },
            AnswerData::Mx {
                preference: 10,
                exchange: "mx.example.com.".to_string(),
            },
            AnswerData::Ns {
                nsdname: "ns1.example.com.".to_string(),
            },
            AnswerData::Ptr {
                ptrdname: "host.example.com.".to_string(),
            },
            AnswerData::Soa {
                mname: "master.example.com.".to_string(),
                rname: "hostmaster.example.com.".to_string(),
                serial: 7,
            },
            AnswerData::Txt {
                text: "v=spf1 -all".to_string(),
            },
            AnswerData::Srv {
                priority: 0,
                weight: 0,
                port: 443,
                target: "svc.example.com.".to_string(),
            },
        ]
    }

    #[test]
    fn test_mixed_answers_keep_only_queried_type() {
        let cases = [
            (RecordType::MX, "mx.example.com."),
            (RecordType::NS, "ns1.example.com."),
            (RecordType::PTR, "host.example.com."),
            (RecordType::SOA, "master.example.com."),
            (RecordType::TXT, "v=spf1 -all"),
        ];

        for (record_type, expected) in cases {
            let target = QueryTarget::new("example.com", record_type);
            let records = RecordExtractor::extract(&success(mixed_answers()), &target);

            assert_eq!(records.len(), 1, "{}", record_type);
            assert_eq!(records[0].record_type, record_type);
            assert_eq!(records[0].value, expected, "{}", record_type);
            assert!(records[0].extra.is_none());
        }
    }

    #[test]
    fn test_srv_targets_differing_only_in_priority_are_kept() {
        let srv = |priority| AnswerData::Srv {
            priority,
            weight: 0,
            port: 5060,
            target: "sip.example.com.".to_string(),
        };
        let outcome = success(vec![srv(10), srv(20), srv(10)]);
        let target = QueryTarget::new("_sip._udp.example.com", RecordType::SRV);

        let priorities: Vec<u16> = RecordExtractor::extract(&outcome, &target)
            .iter()
            .filter_map(|r| r.extra.as_ref().map(|srv| srv.priority))
            .collect();

        assert_eq!(priorities, vec![10, 20]);
    }

    #[test]
    fn test_srv_projection_strips_trailing_dot() {
        let outcome = success(vec![
            AnswerData::Cname {
                cname: "alias.example.com.".to_string(),
            },
            AnswerData::Srv {
                priority: 0,
                weight: 5,
                port: 389,
                target: "dc1.example.com.".to_string(),
            },
        ]);
        let target = QueryTarget::new("_ldap._tcp.example.com", RecordType::SRV);

        let records = RecordExtractor::extract(&outcome, &target);

        assert_eq!(records.len(), 1);
        let srv = records[0].extra.as_ref().expect("srv fields");
        assert_eq!(srv.host, "dc1.example.com");
        assert_eq!(srv.port, 389);
        assert_eq!(srv.priority, 0);
    }

    #[test]
    fn test_empty_and_failure_yield_nothing() {
        let target = QueryTarget::new("example.com", RecordType::A);
        assert!(RecordExtractor::extract(&QueryOutcome::Empty, &target).is_empty());

        let failed = QueryOutcome::failure(FailureKind::Timeout, "timed out");
        assert!(RecordExtractor::extract(&failed, &target).is_empty());
    }
}
