use crate::dns::forwarding::{RecordCodec, RecordTypeMapper};
use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use pod_dns_application::use_cases::ResolveQueryUseCase;
use pod_dns_domain::dns_query::normalize_domain;
use pod_dns_domain::{AnswerSet, DnsQuery, DomainError};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Response code and AA flag for a failed resolution.
pub fn error_response_code(error: &DomainError) -> (ResponseCode, bool) {
    match error {
        DomainError::Authoritative(_) => (ResponseCode::NXDomain, true),
        DomainError::NxDomain | DomainError::Resolution(_) => (ResponseCode::NXDomain, false),
        DomainError::Refused { .. } => (ResponseCode::Refused, false),
        DomainError::InvalidDomainName(_) => (ResponseCode::FormErr, false),
        DomainError::UpstreamFailure { .. }
        | DomainError::InvalidDnsResponse(_)
        | DomainError::QueryTimeout
        | DomainError::TransportTimeout { .. }
        | DomainError::Transport { .. }
        | DomainError::IoError(_)
        | DomainError::NoUpstreamServers => (ResponseCode::ServFail, false),
    }
}

#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<ResolveQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ResolveQueryUseCase>) -> Self {
        Self { use_case }
    }

    fn encode_answers(answers: &AnswerSet) -> Result<Vec<Record>, DomainError> {
        answers.answers.iter().map(RecordCodec::to_hickory).collect()
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr, false)
                    .await;
            }
        };

        let question = &request_info.query;
        let domain = normalize_domain(&question.name().to_utf8()).to_string();
        let record_type = RecordTypeMapper::from_hickory(question.query_type());
        let client_ip = request.src().ip();

        debug!(domain = %domain, record_type = %record_type, client = %client_ip, "DNS query received");

        let query = DnsQuery::new(domain.as_str(), record_type);
        let answers = match self.use_case.execute(&query, None).await {
            Ok(answers) => answers,
            Err(e) => {
                let (code, authoritative) = error_response_code(&e);
                if authoritative {
                    debug!(domain = %domain, "Answering sanity check");
                } else {
                    info!(domain = %domain, record_type = %record_type, error = %e, "Query resolution failed");
                }
                return send_error_response(request, &mut response_handle, code, authoritative)
                    .await;
            }
        };

        let records = match Self::encode_answers(&answers) {
            Ok(records) => records,
            Err(e) => {
                error!(domain = %domain, error = %e, "Failed to encode answers");
                return send_error_response(
                    request,
                    &mut response_handle,
                    ResponseCode::ServFail,
                    false,
                )
                .await;
            }
        };

        debug!(domain = %domain, answers = records.len(), "Sending response");

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = Header::response_from_request(request.header());
        header.set_recursion_available(true);
        let response = builder.build(header, records.iter(), &[] as &[Record], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
    authoritative: bool,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    header.set_authoritative(authoritative);
    header.set_recursion_available(true);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
