use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum, error::ErrorKind};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    ComparisonInput, ComparisonSummary, FundComparison, FundSelector, FundSummary, FundTerms,
    LedgerEntry, PeriodFilter, ProjectionError, compare_funds,
};

mod report;

pub use report::render_report;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const MAX_YEARS: i64 = 30;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFundSelector {
    Both,
    FundA,
    FundB,
}

impl From<CliFundSelector> for FundSelector {
    fn from(value: CliFundSelector) -> Self {
        match value {
            CliFundSelector::Both => FundSelector::Both,
            CliFundSelector::FundA => FundSelector::FundA,
            CliFundSelector::FundB => FundSelector::FundB,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliPeriodFilter {
    All,
    First6,
    Last6,
    Quarterly,
}

impl From<CliPeriodFilter> for PeriodFilter {
    fn from(value: CliPeriodFilter) -> Self {
        match value {
            CliPeriodFilter::All => PeriodFilter::All,
            CliPeriodFilter::First6 => PeriodFilter::First6,
            CliPeriodFilter::Last6 => PeriodFilter::Last6,
            CliPeriodFilter::Quarterly => PeriodFilter::Quarterly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiFundSelector {
    Both,
    #[serde(alias = "fundA", alias = "fund_a", alias = "fund1", alias = "a")]
    FundA,
    #[serde(alias = "fundB", alias = "fund_b", alias = "fund2", alias = "b")]
    FundB,
}

impl From<ApiFundSelector> for CliFundSelector {
    fn from(value: ApiFundSelector) -> Self {
        match value {
            ApiFundSelector::Both => CliFundSelector::Both,
            ApiFundSelector::FundA => CliFundSelector::FundA,
            ApiFundSelector::FundB => CliFundSelector::FundB,
        }
    }
}

impl From<FundSelector> for ApiFundSelector {
    fn from(value: FundSelector) -> Self {
        match value {
            FundSelector::Both => ApiFundSelector::Both,
            FundSelector::FundA => ApiFundSelector::FundA,
            FundSelector::FundB => ApiFundSelector::FundB,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiPeriodFilter {
    All,
    #[serde(alias = "first-6", alias = "first_6")]
    First6,
    #[serde(alias = "last-6", alias = "last_6")]
    Last6,
    #[serde(alias = "quarter")]
    Quarterly,
}

impl From<ApiPeriodFilter> for CliPeriodFilter {
    fn from(value: ApiPeriodFilter) -> Self {
        match value {
            ApiPeriodFilter::All => CliPeriodFilter::All,
            ApiPeriodFilter::First6 => CliPeriodFilter::First6,
            ApiPeriodFilter::Last6 => CliPeriodFilter::Last6,
            ApiPeriodFilter::Quarterly => CliPeriodFilter::Quarterly,
        }
    }
}

impl From<PeriodFilter> for ApiPeriodFilter {
    fn from(value: PeriodFilter) -> Self {
        match value {
            PeriodFilter::All => ApiPeriodFilter::All,
            PeriodFilter::First6 => ApiPeriodFilter::First6,
            PeriodFilter::Last6 => ApiPeriodFilter::Last6,
            PeriodFilter::Quarterly => ApiPeriodFilter::Quarterly,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparePayload {
    #[serde(alias = "initialInvestment")]
    initial_amount: Option<f64>,
    #[serde(alias = "monthlyDeposit")]
    periodic_deposit: Option<f64>,
    #[serde(alias = "fund1Return")]
    annual_return_a: Option<f64>,
    #[serde(alias = "fund1Fee")]
    annual_fee_a: Option<f64>,
    #[serde(alias = "fund2Return")]
    annual_return_b: Option<f64>,
    #[serde(alias = "fund2Fee")]
    annual_fee_b: Option<f64>,
    years: Option<i64>,

    fund: Option<ApiFundSelector>,
    periods: Option<ApiPeriodFilter>,
}

#[derive(Parser, Debug)]
#[command(
    name = "fund-compare",
    about = "Project and compare two investment funds with monthly deposits, returns and fees"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 100_000.0,
        allow_negative_numbers = true,
        help = "Opening balance"
    )]
    initial_amount: f64,
    #[arg(
        long,
        default_value_t = 3_450.0,
        allow_negative_numbers = true,
        help = "Deposit added every month"
    )]
    periodic_deposit: f64,
    #[arg(
        long,
        default_value_t = 32.67,
        allow_negative_numbers = true,
        help = "Fund A annual return in percent over the horizon, e.g. 32.67"
    )]
    annual_return_a: f64,
    #[arg(
        long,
        default_value_t = 0.7,
        allow_negative_numbers = true,
        help = "Fund A annual fee in percent"
    )]
    annual_fee_a: f64,
    #[arg(
        long,
        default_value_t = 23.15,
        allow_negative_numbers = true,
        help = "Fund B annual return in percent over the horizon"
    )]
    annual_return_b: f64,
    #[arg(
        long,
        default_value_t = 0.6,
        allow_negative_numbers = true,
        help = "Fund B annual fee in percent"
    )]
    annual_fee_b: f64,
    #[arg(
        long,
        default_value_t = 3,
        allow_negative_numbers = true,
        help = "Investment period in years"
    )]
    years: i64,
    #[arg(
        long,
        value_enum,
        default_value_t = CliFundSelector::Both,
        help = "Which fund tables to print"
    )]
    fund: CliFundSelector,
    #[arg(
        long,
        value_enum,
        default_value_t = CliPeriodFilter::All,
        help = "Which months to print: all, first 6, last 6, or month 1 plus every third month"
    )]
    periods: CliPeriodFilter,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
struct ViewOptions {
    fund: FundSelector,
    periods: PeriodFilter,
}

#[derive(Debug)]
struct ApiRequest {
    input: ComparisonInput,
    view: ViewOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FundResponse {
    terms: FundTerms,
    summary: FundSummary,
    rows: Option<Vec<LedgerEntry>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    years: u32,
    fund: ApiFundSelector,
    periods: ApiPeriodFilter,
    fund_a: FundResponse,
    fund_b: FundResponse,
    comparison: ComparisonSummary,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_request(cli: Cli) -> Result<ApiRequest, String> {
    if cli.years < 1 {
        return Err(ProjectionError::InvalidDuration(cli.years).to_string());
    }

    if cli.years > MAX_YEARS {
        return Err(format!("--years must be <= {MAX_YEARS}"));
    }

    let years =
        u32::try_from(cli.years).map_err(|_| format!("--years out of range: {}", cli.years))?;

    let input = ComparisonInput {
        initial_amount: cli.initial_amount,
        periodic_deposit: cli.periodic_deposit,
        fund_a: FundTerms {
            annual_return_percent: cli.annual_return_a,
            annual_fee_percent: cli.annual_fee_a,
        },
        fund_b: FundTerms {
            annual_return_percent: cli.annual_return_b,
            annual_fee_percent: cli.annual_fee_b,
        },
        years,
    };

    Ok(ApiRequest {
        input,
        view: ViewOptions {
            fund: cli.fund.into(),
            periods: cli.periods.into(),
        },
    })
}

fn run_request(request: &ApiRequest) -> Result<FundComparison, String> {
    compare_funds(&request.input).map_err(|e| e.to_string())
}

pub fn run_cli<I, T>(args: I) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return Err(e.to_string().trim_end().to_string()),
    };
    let request = build_request(cli)?;
    let comparison = run_request(&request)?;
    log::debug!(
        "computed {}-year comparison for fund selector {:?}",
        request.input.years,
        request.view.fund
    );
    Ok(render_report(
        &request.input,
        &comparison,
        request.view.fund,
        request.view.periods,
    ))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("fund comparison HTTP API listening on http://{addr}");
    log::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn compare_get_handler(Query(payload): Query<ComparePayload>) -> Response {
    compare_handler_impl(payload).await
}

async fn compare_post_handler(Json(payload): Json<ComparePayload>) -> Response {
    compare_handler_impl(payload).await
}

async fn compare_handler_impl(payload: ComparePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            log::warn!("rejected compare request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    let comparison = match run_request(&request) {
        Ok(comparison) => comparison,
        Err(msg) => {
            log::warn!("rejected compare request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    log::debug!(
        "computed {}-year comparison: difference {:.2}",
        request.input.years,
        comparison.comparison.difference_in_final_value
    );

    json_response(StatusCode::OK, build_compare_response(&request, &comparison))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<ComparePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: ComparePayload) -> Result<ApiRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.initial_amount {
        cli.initial_amount = v;
    }
    if let Some(v) = payload.periodic_deposit {
        cli.periodic_deposit = v;
    }
    if let Some(v) = payload.annual_return_a {
        cli.annual_return_a = v;
    }
    if let Some(v) = payload.annual_fee_a {
        cli.annual_fee_a = v;
    }
    if let Some(v) = payload.annual_return_b {
        cli.annual_return_b = v;
    }
    if let Some(v) = payload.annual_fee_b {
        cli.annual_fee_b = v;
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }
    if let Some(v) = payload.fund {
        cli.fund = v.into();
    }
    if let Some(v) = payload.periods {
        cli.periods = v.into();
    }

    build_request(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        initial_amount: 100_000.0,
        periodic_deposit: 3_450.0,
        annual_return_a: 32.67,
        annual_fee_a: 0.7,
        annual_return_b: 23.15,
        annual_fee_b: 0.6,
        years: 3,
        fund: CliFundSelector::Both,
        periods: CliPeriodFilter::All,
    }
}

fn fund_response(
    terms: FundTerms,
    summary: FundSummary,
    ledger: &[LedgerEntry],
    shown: bool,
    periods: PeriodFilter,
) -> FundResponse {
    FundResponse {
        terms,
        summary,
        rows: shown.then(|| periods.apply(ledger)),
    }
}

fn build_compare_response(request: &ApiRequest, comparison: &FundComparison) -> CompareResponse {
    let view = request.view;
    CompareResponse {
        years: request.input.years,
        fund: view.fund.into(),
        periods: view.periods.into(),
        fund_a: fund_response(
            request.input.fund_a,
            comparison.summary_a,
            comparison.fund_a.entries(),
            view.fund.shows_fund_a(),
            view.periods,
        ),
        fund_b: fund_response(
            request.input.fund_b,
            comparison.summary_b,
            comparison.fund_b.entries(),
            view.fund.shows_fund_b(),
            view.periods,
        ),
        comparison: comparison.comparison,
    }
}
