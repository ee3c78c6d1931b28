use std::sync::Arc;

use actix_web::web;

use ph_api::AppState;
use ph_infra::notification::{MockEmailSender, MockSmsSender};
use ph_shared::AppConfig;

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub email: Arc<MockEmailSender>,
    pub sms: Arc<MockSmsSender>,
    pub config: AppConfig,
}

pub fn context() -> TestContext {
    let mut config = AppConfig::default();
    config.auth.password_hash_cost = 4;

    let email = Arc::new(MockEmailSender::new());
    let sms = Arc::new(MockSmsSender::new());
    let state = AppState::with_senders(&config, email.clone(), sms.clone());

    TestContext {
        state: web::Data::new(state),
        email,
        sms,
        config,
    }
}

/// Build the full application for a test context
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(ph_api::create_app(
            $ctx.state.clone(),
            &$ctx.config.cors,
            $ctx.config.environment,
            $ctx.config.server.max_payload_size,
        ))
        .await
    };
}
