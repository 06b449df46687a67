use super::record_codec::RecordCodec;
use hickory_proto::op::{Message, ResponseCode};
use pod_dns_domain::{AnswerSet, DnsRecord, DomainError};
use std::net::SocketAddr;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    pub answers: Vec<DnsRecord>,
}

impl DnsResponse {
    /// Turn the response into an answer set, or the error its code stands for.
    ///
    /// `NOERROR` with no answers is still a success.
    pub fn into_answer_set(self, server: SocketAddr) -> Result<AnswerSet, DomainError> {
        match self.rcode {
            ResponseCode::NoError => Ok(AnswerSet::new(self.answers)),
            ResponseCode::NXDomain => Err(DomainError::NxDomain),
            ResponseCode::Refused => Err(DomainError::Refused {
                server: server.to_string(),
            }),
            other => Err(DomainError::UpstreamFailure {
                server: server.to_string(),
                rcode: ResponseParser::rcode_to_status(other).to_string(),
            }),
        }
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let answers = message
            .answers()
            .iter()
            .map(RecordCodec::to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        let response = DnsResponse {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            answers,
        };

        debug!(
            rcode = ?response.rcode,
            answers = response.answers.len(),
            truncated = response.truncated,
            "DNS response parsed"
        );

        Ok(response)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
