#![allow(dead_code)]
use ferrous_recon_infrastructure::dns::forwarding::MessageBuilder;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, NS, PTR, SOA, SRV};
use hickory_proto::rr::{Name, RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    Tcp,
}

/// Builds the replies for one query. An empty vector means "stay silent";
/// over UDP only the first message is sent.
pub type Handler = Arc<dyn Fn(&Message, Protocol) -> Vec<Message> + Send + Sync>;

/// DNS server on 127.0.0.1 answering over UDP and TCP on the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&Message, Protocol) -> Vec<Message> + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        let (listener, socket) = bind_pair().await;
        let addr = listener.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let udp_handler = Arc::clone(&handler);
        let udp_queries = Arc::clone(&queries);
        let tcp_handler = handler;
        let tcp_queries = Arc::clone(&queries);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Ok(query) = Message::from_vec(&buf[..len]) else { continue };
                        udp_queries.fetch_add(1, Ordering::SeqCst);
                        if let Some(reply) = udp_handler(&query, Protocol::Udp).into_iter().next() {
                            let bytes = MessageBuilder::serialize_message(&reply).unwrap();
                            let _ = socket.send_to(&bytes, peer).await;
                        }
                    }
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let handler = Arc::clone(&tcp_handler);
                        let queries = Arc::clone(&tcp_queries);
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut body = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut body).await.is_err() {
                                return;
                            }
                            let Ok(query) = Message::from_vec(&body) else { return };
                            queries.fetch_add(1, Ordering::SeqCst);
                            for reply in handler(&query, Protocol::Tcp) {
                                let bytes = MessageBuilder::serialize_message(&reply).unwrap();
                                let mut framed = (bytes.len() as u16).to_be_bytes().to_vec();
                                framed.extend_from_slice(&bytes);
                                if stream.write_all(&framed).await.is_err() {
                                    return;
                                }
                            }
                        });
                    }
                }
            }
        });

        Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn queries_received(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// TCP listener and UDP socket sharing one ephemeral port.
async fn bind_pair() -> (TcpListener, UdpSocket) {
    for _ in 0..20 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        if let Ok(socket) = UdpSocket::bind(addr).await {
            return (listener, socket);
        }
    }
    panic!("could not bind a shared UDP/TCP port");
}

// ============================================================================
// Reply builders
// ============================================================================

pub fn name(value: &str) -> Name {
    Name::from_str(value).unwrap()
}

/// Empty NOERROR reply echoing the question.
pub fn reply_to(query: &Message) -> Message {
    let mut reply = Message::new(query.id(), MessageType::Response, OpCode::Query);
    reply.set_recursion_desired(query.recursion_desired());
    reply.set_recursion_available(true);
    for question in query.queries() {
        reply.add_query(question.clone());
    }
    reply
}

pub fn reply_with(query: &Message, answers: Vec<Record>) -> Message {
    let mut reply = reply_to(query);
    for answer in answers {
        reply.add_answer(answer);
    }
    reply
}

pub fn reply_code(query: &Message, code: ResponseCode) -> Message {
    let mut reply = reply_to(query);
    reply.set_response_code(code);
    reply
}

pub fn question_name(query: &Message) -> String {
    query
        .queries()
        .first()
        .map(|q| q.name().to_utf8())
        .unwrap_or_default()
}

pub fn a_record(owner: &str, ip: Ipv4Addr) -> Record {
    Record::from_rdata(name(owner), 300, RData::A(A(ip)))
}

pub fn ns_record(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::NS(NS(name(target))))
}

pub fn ptr_record(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::PTR(PTR(name(target))))
}

pub fn srv_record(owner: &str, priority: u16, port: u16, target: &str) -> Record {
    Record::from_rdata(
        name(owner),
        300,
        RData::SRV(SRV::new(priority, 0, port, name(target))),
    )
}

pub fn soa_record(zone: &str) -> Record {
    Record::from_rdata(
        name(zone),
        3600,
        RData::SOA(SOA::new(
            name(&format!("ns1.{}", zone)),
            name(&format!("hostmaster.{}", zone)),
            2024010101,
            7200,
            3600,
            1209600,
            300,
        )),
    )
}
