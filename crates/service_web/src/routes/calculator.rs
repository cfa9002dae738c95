//! Monte Carlo option calculator form.
//!
//! `GET /` renders the form with its default values; `POST /` parses the
//! submitted fields, compiles the payoff expression with the conventional
//! terminal-price aliases and injected constants, runs the estimator and
//! re-renders the page with the price or the error text. User-level
//! failures always come back as a normal page; nothing a user types can
//! take the process down.

use std::collections::HashMap;

use axum::{
    extract::Form,
    response::Html,
    routing::get,
    Router,
};
use pricer_engines::mc::{estimate, GbmParams, McConfig};
use pricer_engines::SimulationError;
use pricer_expr::{ExprError, PayoffExpr};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::AppState;

/// Names the terminal price is bound to inside payoff expressions.
const TERMINAL_ALIASES: &[&str] = &["s", "ST", "S_T"];

/// Raw form fields, exactly as submitted.
///
/// Everything arrives as text; parsing happens in [`price_request`] so a
/// bad field becomes an error message on the page rather than a 422.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalculatorForm {
    /// Spot price (S0).
    pub spot: String,
    /// Risk-free rate (r).
    pub rate: String,
    /// Dividend yield (q).
    pub dividend_yield: String,
    /// Volatility (sigma).
    pub volatility: String,
    /// Maturity in years.
    pub maturity: String,
    /// Number of Monte Carlo paths.
    pub simulations: String,
    /// Strike (K), optional.
    pub strike: String,
    /// Barrier level (B), optional.
    pub barrier: String,
    /// Extra constants as a JSON object.
    pub custom_context: String,
    /// Payoff expression.
    pub payoff: String,
    /// RNG seed, optional.
    pub seed: String,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        Self {
            spot: "100.0".to_string(),
            rate: "0.05".to_string(),
            dividend_yield: "0.0".to_string(),
            volatility: "0.2".to_string(),
            maturity: "1.0".to_string(),
            simulations: "10000".to_string(),
            strike: "100.0".to_string(),
            barrier: String::new(),
            custom_context: "{\n  \"rebate\": 0.0\n}".to_string(),
            payoff: "max(S_T - K, 0)".to_string(),
            seed: String::new(),
        }
    }
}

/// Calculator-level errors rendered into the page.
#[derive(Debug, Error)]
enum CalcError {
    #[error("{field} must be numeric")]
    FieldNotNumeric { field: &'static str },

    #[error("{field} must be a non-negative integer")]
    FieldNotInteger { field: &'static str },

    #[error("Could not parse JSON constants: {0}")]
    ConstantsJson(String),

    #[error("Constants JSON must decode to an object")]
    ConstantsNotObject,

    #[error("Constant '{key}' must be numeric")]
    ConstantNotNumeric { key: String },

    #[error(transparent)]
    Expr(#[from] ExprError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Build the calculator routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index).post(calculate))
}

/// GET / - render the form with default values
async fn index() -> Html<String> {
    Html(render_page(&CalculatorForm::default(), None, None))
}

/// POST / - price the submitted payoff and re-render the page
async fn calculate(Form(form): Form<CalculatorForm>) -> Html<String> {
    match price_request(&form) {
        Ok(price) => {
            info!(payoff = %form.payoff, price, "Priced payoff");
            Html(render_page(&form, Some(&format!("{price:.4}")), None))
        }
        Err(err) => {
            info!(payoff = %form.payoff, error = %err, "Calculator request failed");
            Html(render_page(&form, None, Some(&err.to_string())))
        }
    }
}

/// Parses the form, compiles the payoff and runs the estimator.
fn price_request(form: &CalculatorForm) -> Result<f64, CalcError> {
    let spot = to_float(&form.spot, "Spot")?;
    let rate = to_float(&form.rate, "Rate")?;
    let dividend_yield = to_float(&form.dividend_yield, "Dividend yield")?;
    let volatility = to_float(&form.volatility, "Volatility")?;
    let maturity = to_float(&form.maturity, "Maturity")?;
    let simulations = to_count(&form.simulations, "Simulations")?;
    let strike = optional_float(&form.strike, "Strike")?;
    let barrier = optional_float(&form.barrier, "Barrier")?;
    let seed = match form.seed.trim() {
        "" => None,
        text => Some(text.parse::<u64>().map_err(|_| CalcError::FieldNotInteger {
            field: "Seed",
        })?),
    };

    let mut constants = parse_constants(&form.custom_context)?;
    if let Some(strike) = strike {
        constants.insert("K".to_string(), strike);
    }
    if let Some(barrier) = barrier {
        constants.insert("B".to_string(), barrier);
    }

    let payoff = PayoffExpr::compile(&form.payoff, TERMINAL_ALIASES, &constants)?;

    let params = GbmParams {
        spot,
        rate,
        volatility,
        maturity,
        dividend_yield,
    };
    let mut builder = McConfig::builder().n_paths(simulations);
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    let config = builder.build()?;

    Ok(estimate(params, &config, &payoff)?.price)
}

fn to_float(value: &str, field: &'static str) -> Result<f64, CalcError> {
    value
        .trim()
        .parse()
        .map_err(|_| CalcError::FieldNotNumeric { field })
}

fn to_count(value: &str, field: &'static str) -> Result<usize, CalcError> {
    value
        .trim()
        .parse()
        .map_err(|_| CalcError::FieldNotInteger { field })
}

fn optional_float(value: &str, field: &'static str) -> Result<Option<f64>, CalcError> {
    match value.trim() {
        "" => Ok(None),
        text => to_float(text, field).map(Some),
    }
}

/// Parses the extra-constants JSON object. Blank input means no constants.
fn parse_constants(raw: &str) -> Result<HashMap<String, f64>, CalcError> {
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }

    let data: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| CalcError::ConstantsJson(e.to_string()))?;

    let object = match data {
        serde_json::Value::Object(object) => object,
        _ => return Err(CalcError::ConstantsNotObject),
    };

    let mut constants = HashMap::with_capacity(object.len());
    for (key, value) in object {
        let number = value
            .as_f64()
            .ok_or_else(|| CalcError::ConstantNotNumeric { key: key.clone() })?;
        constants.insert(key, number);
    }
    Ok(constants)
}

/// Escapes text for safe inclusion in HTML attribute and body positions.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Monte Carlo Option Calculator</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 2rem auto; max-width: 900px; }
        h1 { margin-bottom: 0.2rem; }
        .note { color: #444; margin-top: 0; }
        form { display: grid; grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 1rem 1.5rem; }
        label { font-weight: bold; display: block; margin-bottom: 0.4rem; }
        input, textarea { width: 100%; padding: 0.4rem; font-size: 1rem; }
        textarea { min-height: 6rem; }
        .full { grid-column: span 2; }
        .result { background: #f5f5f5; padding: 1rem; border-radius: 8px; margin-top: 1rem; }
        .error { color: #b00020; font-weight: bold; }
        button { padding: 0.7rem 1.2rem; font-size: 1rem; cursor: pointer; }
        code { background: #eee; padding: 0 0.2rem; }
    </style>
</head>
<body>
    <h1>Monte Carlo Option Calculator</h1>
    <p class="note">Enter market parameters and a payoff expression to price options with Monte Carlo simulation.</p>
"#;

const PAGE_FOOT: &str = r#"    <div class="result">
        <strong>Tips:</strong>
        <ul>
            <li>Terminal price aliases: <code>s</code>, <code>ST</code>, <code>S_T</code>.</li>
            <li>Constants available automatically: <code>K</code> (strike), <code>B</code> (barrier, if set), and anything supplied in the JSON box.</li>
            <li>Math helpers: <code>exp</code>, <code>log</code>, <code>sqrt</code>, <code>sin</code>, <code>cos</code>, <code>tan</code>, <code>fabs</code>, <code>pi</code>, <code>e</code>, <code>erf</code>, <code>erfc</code>, <code>max</code>, <code>min</code>.</li>
        </ul>
    </div>
</body>
</html>
"#;

/// Renders the calculator page.
fn render_page(form: &CalculatorForm, price: Option<&str>, error: Option<&str>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str(PAGE_HEAD);

    if let Some(error) = error {
        html.push_str(&format!(
            "    <div class=\"result error\">{}</div>\n",
            escape_html(error)
        ));
    }
    if let Some(price) = price {
        html.push_str(&format!(
            "    <div class=\"result\">Estimated price: <strong>{}</strong></div>\n",
            escape_html(price)
        ));
    }

    html.push_str("    <form method=\"post\" action=\"/\">\n");
    for (id, label, value) in [
        ("spot", "Spot (S0)", &form.spot),
        ("rate", "Risk-free rate (r)", &form.rate),
        ("dividend_yield", "Dividend yield (q)", &form.dividend_yield),
        ("volatility", "Volatility (&sigma;)", &form.volatility),
        ("maturity", "Maturity (years)", &form.maturity),
        ("simulations", "Simulations", &form.simulations),
        ("strike", "Strike (K, optional)", &form.strike),
        ("barrier", "Barrier level (B, optional)", &form.barrier),
    ] {
        html.push_str(&format!(
            "        <div>\n            <label for=\"{id}\">{label}</label>\n            \
             <input id=\"{id}\" name=\"{id}\" type=\"text\" value=\"{}\">\n        </div>\n",
            escape_html(value)
        ));
    }

    html.push_str(&format!(
        "        <div class=\"full\">\n            <label for=\"payoff\">Payoff expression</label>\n            \
         <textarea id=\"payoff\" name=\"payoff\" required>{}</textarea>\n            \
         <p class=\"note\">Use any of the variables <code>s</code>, <code>ST</code>, or <code>S_T</code> \
         for the terminal price, plus constants you set below (e.g. <code>K</code>, <code>B</code>, \
         <code>rebate</code>). Example: <code>max(S_T - K, 0)</code></p>\n        </div>\n",
        escape_html(&form.payoff)
    ));
    html.push_str(&format!(
        "        <div class=\"full\">\n            <label for=\"custom_context\">Extra constants (JSON object)</label>\n            \
         <textarea id=\"custom_context\" name=\"custom_context\">{}</textarea>\n            \
         <p class=\"note\">Provide any additional constants your payoff uses. \
         Example: <code>{{\"rebate\": 2.5, \"cap\": 120}}</code></p>\n        </div>\n",
        escape_html(&form.custom_context)
    ));
    html.push_str(&format!(
        "        <div>\n            <label for=\"seed\">Random seed (optional)</label>\n            \
         <input id=\"seed\" name=\"seed\" type=\"text\" value=\"{}\">\n        </div>\n",
        escape_html(&form.seed)
    ));
    html.push_str(
        "        <div class=\"full\">\n            <button type=\"submit\">Calculate</button>\n        </div>\n    </form>\n",
    );

    html.push_str(PAGE_FOOT);
    html
}
