#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How the mock answers every query it receives.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// One A record with this address, owned by the queried name
    Address(Ipv4Addr),
    /// No answers, this response code
    Rcode(ResponseCode),
    /// TC bit over UDP, full answer over TCP
    TruncateUdp(Ipv4Addr),
    /// Answer with a different message ID
    WrongId,
    /// Never answer
    Silent,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<Mutex<Vec<String>>>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Listen on an ephemeral localhost port, UDP and TCP.
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let queries = Arc::new(Mutex::new(Vec::new()));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_queries = queries.clone();
        let tcp_queries_task = queries.clone();
        let tcp_count = tcp_queries.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = respond(&buf[..len], behavior, false, &udp_queries) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            tcp_count.fetch_add(1, Ordering::SeqCst);
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                continue;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                continue;
                            }
                            if let Some(response) = respond(&query, behavior, true, &tcp_queries_task) {
                                let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                                let _ = stream.write_all(&response).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Names received so far, in arrival order, without the trailing dot.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn tcp_query_count(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
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

fn respond(
    query: &[u8],
    behavior: MockBehavior,
    over_tcp: bool,
    seen: &Mutex<Vec<String>>,
) -> Option<Vec<u8>> {
    let request = Message::from_vec(query).ok()?;
    let question = request.queries().first()?.clone();
    seen.lock()
        .unwrap()
        .push(question.name().to_utf8().trim_end_matches('.').to_string());

    let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);
    response.set_recursion_desired(true);
    response.set_recursion_available(true);
    response.add_query(question.clone());

    let answer = |ip: Ipv4Addr| Record::from_rdata(question.name().clone(), 30, RData::A(A(ip)));

    match behavior {
        MockBehavior::Address(ip) => {
            response.add_answer(answer(ip));
        }
        MockBehavior::Rcode(code) => {
            response.set_response_code(code);
        }
        MockBehavior::TruncateUdp(ip) => {
            if over_tcp {
                response.add_answer(answer(ip));
            } else {
                response.set_truncated(true);
            }
        }
        MockBehavior::WrongId => {
            let mut header = *response.header();
            header.set_id(request.id().wrapping_add(1));
            response.set_header(header);
        }
        MockBehavior::Silent => return None,
    }

    response.to_vec().ok()
}
