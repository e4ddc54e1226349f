//! HTTP request handlers for the web adapter.

use askama::Template;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::domain::error::SimError;
use crate::domain::player::TradeReceipt;
use crate::domain::scheduler::SchedulerState;

use super::models::{
    BuyResponse, HistoryResponse, MarketResponse, MessageResponse, PortfolioBody,
    PortfolioResponse, SellResponse, StatusResponse, TradeRequest, round2,
};
use super::templates::{ErrorTemplate, IndexTemplate};
use super::{AppState, WebError, wants_html};

const STARTED: &str = "Simulation started";
const STOPPED: &str = "Simulation stopped";

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    let overview = state.simulation.overview();
    let template = IndexTemplate {
        quotes: &overview.quotes,
        cash: overview.portfolio.cash,
        total_value: overview.total_value,
        running: overview.status.running,
        interval_secs: overview.status.interval.as_secs_f64(),
    };
    template
        .render()
        .map(Html)
        .map_err(|e| WebError::internal(format!("template error: {e}")))
}

pub async fn market(State(state): State<Arc<AppState>>) -> Json<MarketResponse> {
    Json(MarketResponse(state.simulation.show_market()))
}

pub async fn stock_history(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<HistoryResponse>, WebError> {
    let prices = state.simulation.stock_history(&name)?;
    Ok(Json(HistoryResponse::new(prices)))
}

/// Trade rejections come back as a normal payload with a zero total.
fn settle(result: Result<TradeReceipt, SimError>) -> Result<(String, f64), WebError> {
    match result {
        Ok(receipt) => Ok((receipt.message(), round2(receipt.total))),
        Err(err) if err.is_trade_rejection() => Ok((err.to_string(), 0.0)),
        Err(err) => Err(err.into()),
    }
}

pub async fn buy(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TradeRequest>, JsonRejection>,
) -> Result<Json<BuyResponse>, WebError> {
    let Json(request) = payload?;
    let amount = request.amount()?;
    let (message, total_cost) = settle(state.simulation.buy(&request.stock_name, amount))?;

    Ok(Json(BuyResponse {
        message,
        total_cost,
        portfolio: PortfolioBody::from(state.simulation.portfolio()),
    }))
}

pub async fn sell(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TradeRequest>, JsonRejection>,
) -> Result<Json<SellResponse>, WebError> {
    let Json(request) = payload?;
    let amount = request.amount()?;
    let (message, total_earnings) = settle(state.simulation.sell(&request.stock_name, amount))?;

    Ok(Json(SellResponse {
        message,
        total_earnings,
        portfolio: PortfolioBody::from(state.simulation.portfolio()),
    }))
}

pub async fn portfolio(State(state): State<Arc<AppState>>) -> Json<PortfolioResponse> {
    let overview = state.simulation.overview();
    Json(PortfolioResponse {
        portfolio: PortfolioBody::from(overview.portfolio),
        total_value: round2(overview.total_value),
    })
}

pub async fn toggle_simulation(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    let message = match state.simulation.toggle() {
        SchedulerState::Running => STARTED,
        SchedulerState::Stopped => STOPPED,
    };
    Json(MessageResponse::new(message))
}

pub async fn start_simulation(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.simulation.start();
    Json(MessageResponse::new(STARTED))
}

pub async fn stop_simulation(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.simulation.stop();
    Json(MessageResponse::new(STOPPED))
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.simulation.reset();
    Json(MessageResponse::new("Simulation and portfolio reset"))
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse::from(state.simulation.status()))
}

pub async fn not_found(headers: HeaderMap) -> Response {
    if wants_html(&headers) {
        let template = ErrorTemplate {
            message: "Page not found",
            status: StatusCode::NOT_FOUND.as_u16(),
        };
        if let Ok(html) = template.render() {
            return (StatusCode::NOT_FOUND, Html(html)).into_response();
        }
    }
    WebError::not_found("Not found").into_response()
}
