// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ForecastBackend, ForecastRequest};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stockcast::TransportError;
use stockcast_domain::{ForecastMonth, InventoryFile};

pub fn month(year: i32, number: u8) -> ForecastMonth {
    ForecastMonth::new(year, number).unwrap()
}

pub fn current_month() -> ForecastMonth {
    month(2024, 12)
}

pub fn create_test_csv(name: &str) -> InventoryFile {
    InventoryFile::new(
        name,
        Some(String::from("text/csv")),
        b"product_code,date,sales\nAlpha,2024-10-01,10\nBravo,2024-10-01,4\n".to_vec(),
    )
}

/// A three-month response for products Alpha and Bravo.
pub fn three_month_body() -> Value {
    json!({
        "forecasted_products": [
            { "2025-01-01": { "Alpha": 100.4, "Bravo": 50 } },
            { "2025-02-01": { "Alpha": 110, "Bravo": null } },
            { "2025-03-01": { "Alpha": 120.6, "Bravo": 0 } }
        ],
        "meta": {
            "method": "prophet",
            "generated_on": "2024-12-15T08:30:00",
            "last_dates_per_product": { "Alpha": "2024-10-01", "Bravo": "2024-10-01" }
        },
        "metrics": {
            "Alpha": { "mape": 8.5, "smape": 8.1, "rmse": 4.2, "accuracy": 91.5 }
        },
        "aggregated_metrics": {
            "mape_mean": 8.5,
            "smape_mean": 8.1,
            "rmse_mean": 4.2,
            "accuracy_mean": 91.5
        }
    })
}

/// A one-month response for a single product.
pub fn one_month_body(product: &str, value: f64) -> Value {
    json!({
        "forecasted_products": [ { "2025-01-01": { product: value } } ]
    })
}

/// A backend that answers from a table keyed by file name and records every
/// request it receives. Clones share the record of received requests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    answers: HashMap<String, Result<Vec<u8>, TransportError>>,
    received: Arc<Mutex<Vec<ForecastRequest>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, file_name: &str, body: &Value) -> Self {
        self.answers
            .insert(file_name.to_string(), Ok(serde_json::to_vec(body).unwrap()));
        self
    }

    pub fn answer_raw(mut self, file_name: &str, body: &[u8]) -> Self {
        self.answers.insert(file_name.to_string(), Ok(body.to_vec()));
        self
    }

    pub fn fail(mut self, file_name: &str, error: TransportError) -> Self {
        self.answers.insert(file_name.to_string(), Err(error));
        self
    }

    pub fn received(&self) -> Vec<ForecastRequest> {
        self.received.lock().unwrap().clone()
    }
}

impl ForecastBackend for ScriptedBackend {
    async fn generate(&self, request: ForecastRequest) -> Result<Vec<u8>, TransportError> {
        let answer: Result<Vec<u8>, TransportError> = self
            .answers
            .get(request.file_name())
            .cloned()
            .unwrap_or(Err(TransportError::Status(404)));
        self.received.lock().unwrap().push(request);
        answer
    }
}
