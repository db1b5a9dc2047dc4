//! WASM bindings for in-browser match replay

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::api::{ErrorResponse, SimulationRequest, Simulator};

/// Registered strategy names, as `{ strategies: [...] }`
#[wasm_bindgen]
pub fn get_strategies() -> Result<JsValue, JsError> {
    let response = Simulator::default().strategies();

    serde_wasm_bindgen::to_value(&response)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get human-readable description of a strategy
#[wasm_bindgen]
pub fn describe_strategy(name: &str) -> Result<String, JsError> {
    Simulator::default()
        .registry()
        .describe(name)
        .map(str::to_string)
        .ok_or_else(|| JsError::new(&format!("Unknown strategy: {}", name)))
}

/// Run a match locally
///
/// # Arguments
/// * `request_json` - JSON serialized SimulationRequest
/// * `seed` - Used when the request carries no seed of its own
///
/// # Returns
/// MatchResult object, or throws `{ kind, detail }`
#[wasm_bindgen]
pub fn run_simulation(request_json: &str, seed: u64) -> Result<JsValue, JsValue> {
    let simulator = Simulator::default();
    let outcome = SimulationRequest::from_json(request_json)
        .and_then(|request| simulator.run_seeded(&request, seed));

    match outcome {
        Ok(result) => serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e))),
        Err(e) => Err(serde_wasm_bindgen::to_value(&ErrorResponse::from(&e))
            .unwrap_or_else(|_| JsValue::from_str(&e.to_string()))),
    }
}
