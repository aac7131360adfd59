//! App Router

use salvo::Router;

use crate::{assets, cors, healthcheck, metadata, pages, tokens};

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(cors::handler)
        .get(pages::index)
        .options(cors::handler)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("callback").get(pages::callback))
        .push(Router::with_path("cognito-metadata").get(metadata::handler))
        .push(Router::with_path("log-tokens").post(tokens::log::handler))
        .push(Router::with_path("oauth/token").post(tokens::exchange::handler))
        .push(Router::with_path("{*+path}").goal(assets::handler))
}
