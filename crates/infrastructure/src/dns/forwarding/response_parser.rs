use ferrous_recon_domain::{AnswerData, AnswerRecord, DnsAnswer, DomainError, ResponseCode};
use hickory_proto::op::{Message, MessageType, ResponseCode as HickoryResponseCode};
use hickory_proto::rr::{RData, Record};
use tracing::debug;

/// The parts of a reply the query client acts on.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,
    pub rcode: ResponseCode,
    pub truncated: bool,
    pub answers: Vec<AnswerRecord>,
}

impl DnsResponse {
    pub fn is_refused(&self) -> bool {
        matches!(self.rcode, ResponseCode::Refused | ResponseCode::NotAuth)
    }

    pub fn into_answer(self) -> DnsAnswer {
        DnsAnswer::new(self.rcode, self.answers)
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "Received a query where a response was expected".to_string(),
            ));
        }

        let rcode = Self::map_rcode(message.response_code());
        let truncated = message.truncated();
        let answers: Vec<AnswerRecord> = message
            .answers()
            .iter()
            .map(Self::convert_record)
            .collect();

        debug!(
            rcode = %rcode,
            answers = answers.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode,
            truncated,
            answers,
        })
    }

    /// Projects a hickory record onto the domain's answer model. Types the
    /// enumerators never ask for are kept as `Other` with their wire code.
    pub fn convert_record(record: &Record) -> AnswerRecord {
        let data = match record.data() {
            RData::A(a) => AnswerData::A { address: a.0 },
            RData::AAAA(aaaa) => AnswerData::Aaaa { address: aaaa.0 },
            RData::NS(ns) => AnswerData::Ns {
                nsdname: ns.0.to_utf8(),
            },
            RData::CNAME(canonical) => AnswerData::Cname {
                cname: canonical.0.to_utf8(),
            },
            RData::PTR(ptr) => AnswerData::Ptr {
                ptrdname: ptr.0.to_utf8(),
            },
            RData::MX(mx) => AnswerData::Mx {
                preference: mx.preference(),
                exchange: mx.exchange().to_utf8(),
            },
            RData::TXT(txt) => AnswerData::Txt {
                text: txt
                    .txt_data()
                    .iter()
                    .map(|chunk| String::from_utf8_lossy(chunk))
                    .collect::<Vec<_>>()
                    .join(""),
            },
            RData::SOA(soa) => AnswerData::Soa {
                mname: soa.mname().to_utf8(),
                rname: soa.rname().to_utf8(),
                serial: soa.serial(),
            },
            RData::SRV(srv) => AnswerData::Srv {
                priority: srv.priority(),
                weight: srv.weight(),
                port: srv.port(),
                target: srv.target().to_utf8(),
            },
            _ => AnswerData::Other {
                code: u16::from(record.record_type()),
            },
        };

        AnswerRecord::new(record.name().to_utf8(), record.ttl(), data)
    }

    fn map_rcode(rcode: HickoryResponseCode) -> ResponseCode {
        match rcode {
            HickoryResponseCode::NoError => ResponseCode::NoError,
            HickoryResponseCode::FormErr => ResponseCode::FormErr,
            HickoryResponseCode::ServFail => ResponseCode::ServFail,
            HickoryResponseCode::NXDomain => ResponseCode::NXDomain,
            HickoryResponseCode::NotImp => ResponseCode::NotImp,
            HickoryResponseCode::Refused => ResponseCode::Refused,
            HickoryResponseCode::NotAuth => ResponseCode::NotAuth,
            other => ResponseCode::Other(u16::from(other)),
        }
    }
}
