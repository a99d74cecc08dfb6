//! Tera function bindings backed by one pass's [`RenderCoordinator`].
//!
//! Keyword arguments other than `name` are the call's render options:
//!
//! ```text
//! {{ react_component(name="Greeter", props=user, rendering="both", cached=true) }}
//! {{ redux_store(name="cart", props=cart) }}
//! {{ react_flush_buffer() }}
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};
use tera::{Function, Tera};

use reactrender_core::{Props, RenderCoordinator, RenderError, RenderOptions};

/// Coordinator shared by the functions registered for one render pass.
pub type SharedCoordinator = Arc<Mutex<RenderCoordinator>>;

/// Register the four helpers on `tera`, bound to `coordinator`.
pub fn register_functions(tera: &mut Tera, coordinator: &SharedCoordinator) {
    tera.register_function(
        "react_component",
        ReactComponent {
            coordinator: Arc::clone(coordinator),
            structured: false,
        },
    );
    tera.register_function(
        "react_component_array",
        ReactComponent {
            coordinator: Arc::clone(coordinator),
            structured: true,
        },
    );
    tera.register_function(
        "redux_store",
        ReduxStore {
            coordinator: Arc::clone(coordinator),
        },
    );
    tera.register_function(
        "react_flush_buffer",
        FlushBuffer {
            coordinator: Arc::clone(coordinator),
        },
    );
}

fn lock(coordinator: &SharedCoordinator) -> tera::Result<MutexGuard<'_, RenderCoordinator>> {
    coordinator
        .lock()
        .map_err(|_| tera::Error::msg("render coordinator lock poisoned"))
}

fn required_name(function: &str, args: &HashMap<String, Value>) -> tera::Result<String> {
    match args.get("name") {
        Some(Value::String(name)) => Ok(name.clone()),
        Some(other) => Err(tera::Error::msg(format!(
            "`{function}`: `name` must be a string, got {other}"
        ))),
        None => Err(tera::Error::msg(format!(
            "`{function}` requires a `name` argument"
        ))),
    }
}

/// Every keyword argument except `name`, as render options.
fn options_from_args(function: &str, args: &HashMap<String, Value>) -> tera::Result<RenderOptions> {
    let map: Map<String, Value> = args
        .iter()
        .filter(|(key, _)| key.as_str() != "name")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    RenderOptions::from_value(Value::Object(map))
        .map_err(|e| tera::Error::chain(format!("`{function}`: invalid options"), e))
}

// ---------------------------------------------------------------------------
// react_component / react_component_array
// ---------------------------------------------------------------------------

struct ReactComponent {
    coordinator: SharedCoordinator,
    structured: bool,
}

impl ReactComponent {
    fn function_name(&self) -> &'static str {
        if self.structured {
            "react_component_array"
        } else {
            "react_component"
        }
    }
}

impl Function for ReactComponent {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let function = self.function_name();
        let name = required_name(function, args)?;
        let options = options_from_args(function, args)?;
        let mut coordinator = lock(&self.coordinator)?;

        let failed = |e: RenderError| {
            tera::Error::chain(format!("{function}(name=\"{name}\") failed"), e)
        };
        if self.structured {
            let component = coordinator
                .render_component_array(&name, &options)
                .map_err(failed)?;
            serde_json::to_value(component)
                .map_err(|e| tera::Error::chain(format!("{function}: cannot expose result"), e))
        } else {
            let markup = coordinator.render_component(&name, &options).map_err(failed)?;
            Ok(Value::String(markup))
        }
    }

    fn is_safe(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// redux_store
// ---------------------------------------------------------------------------

struct ReduxStore {
    coordinator: SharedCoordinator,
}

impl Function for ReduxStore {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let name = required_name("redux_store", args)?;
        let props = match args.get("props") {
            None | Some(Value::Null) => Props::default(),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                tera::Error::chain("`redux_store`: `props` must be an object or a JSON string", e)
            })?,
        };
        let markup = lock(&self.coordinator)?
            .register_store(&name, &props)
            .map_err(|e| tera::Error::chain(format!("redux_store(name=\"{name}\") failed"), e))?;
        Ok(Value::String(markup))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// react_flush_buffer
// ---------------------------------------------------------------------------

struct FlushBuffer {
    coordinator: SharedCoordinator,
}

impl Function for FlushBuffer {
    fn call(&self, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(Value::String(lock(&self.coordinator)?.flush_buffer()))
    }

    fn is_safe(&self) -> bool {
        true
    }
}
