use crate::ClientError;
use crate::ContextBrokerEndPoint;
use crate::HttpResponse;
use crate::Payload;
use crate::ReqwestTransport;
use crate::ServiceRequest;
use crate::Tenant;
use crate::Transport;
use ngsi_payload::entity::build_entities;
use ngsi_payload::entity::build_entities_raw;
use ngsi_payload::subscription::build_subscription;
use ngsi_payload::subscription::build_subscription_raw;
use ngsi_payload::AttributeMode;
use ngsi_payload::EntityContext;
use ngsi_payload::SubscriptionContext;
use qa_config::QaConfig;
use std::time::Duration;
use tracing::debug;
use tracing::info;

/// Creates entities and subscriptions on a context broker.
///
/// Every request carries the tenant headers and the configured timeout.
/// A payload is parsed before being sent and a malformed one is never sent.
pub struct ContextBrokerClient {
    transport: Box<dyn Transport>,
    end_point: ContextBrokerEndPoint,
    tenant: Tenant,
    timeout: Option<Duration>,
}

impl ContextBrokerClient {
    pub fn new(
        transport: Box<dyn Transport>,
        end_point: ContextBrokerEndPoint,
        tenant: Tenant,
    ) -> Self {
        ContextBrokerClient {
            transport,
            end_point,
            tenant,
            timeout: None,
        }
    }

    pub fn try_new(config: &QaConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::try_new()?;
        let end_point = ContextBrokerEndPoint::from_config(config)?;
        let tenant = Tenant::from_config(config);
        Ok(ContextBrokerClient::new(Box::new(transport), end_point, tenant)
            .with_timeout(config.http_timeout()))
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        ContextBrokerClient {
            timeout: Some(timeout),
            ..self
        }
    }

    pub fn end_point(&self) -> &ContextBrokerEndPoint {
        &self.end_point
    }

    pub fn tenant(&self) -> &Tenant {
        &self.tenant
    }

    /// Build the request with the tenant headers and the timeout of this client.
    pub fn request(&self, request: ServiceRequest) -> ServiceRequest {
        let request = request.with_tenant(&self.tenant);
        match self.timeout {
            Some(timeout) => request.with_timeout(timeout),
            None => request,
        }
    }

    /// Validate the payload of the request, if any, then execute it.
    pub fn send(&self, request: ServiceRequest) -> Result<HttpResponse, ClientError> {
        if let Some(payload) = request.payload() {
            payload.validate()?;
        }
        let response = self.transport.execute(&request)?;
        info!(
            method = %request.method(),
            url = %request.url(),
            status = response.status,
            "Request sent"
        );
        Ok(response)
    }

    /// POST one entity per generated entity of the context.
    ///
    /// Stops at the first failure, the responses received so far being lost.
    pub fn create_entities(
        &self,
        context: &EntityContext,
        mode: AttributeMode,
        raw: bool,
    ) -> Result<Vec<HttpResponse>, ClientError> {
        let payloads: Vec<Payload> = if raw {
            build_entities_raw(context, mode)?
                .into_iter()
                .map(Payload::json)
                .collect()
        } else {
            build_entities(context, mode)
                .iter()
                .map(Payload::from_value)
                .collect()
        };

        let url = self.end_point.get_url_for_entities()?;
        payloads
            .into_iter()
            .map(|payload| {
                debug!(payload = payload.text(), "Entity payload");
                let mut request = ServiceRequest::post(url.clone());
                if let Some(options) = mode.options_query() {
                    request = request.with_query("options", options);
                }
                self.send(self.request(request.with_payload(payload)))
            })
            .collect()
    }

    pub fn create_subscription(
        &self,
        context: &SubscriptionContext,
        raw: bool,
    ) -> Result<HttpResponse, ClientError> {
        let payload = if raw {
            Payload::json(build_subscription_raw(context)?)
        } else {
            Payload::from_value(&build_subscription(context))
        };
        debug!(payload = payload.text(), "Subscription payload");

        let url = self.end_point.get_url_for_subscriptions()?;
        self.send(self.request(ServiceRequest::post(url).with_payload(payload)))
    }
}
