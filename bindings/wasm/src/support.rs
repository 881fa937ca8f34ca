// Support utilities for WASM bindings
use serde::de::DeserializeOwned;

/// Parse a JSON config, falling back to defaults when the string is empty
/// or malformed. Browser callers pass partial configs routinely.
pub fn parse_with_defaults<T: DeserializeOwned + Default>(config_json: &str) -> T {
    if config_json.trim().is_empty() || config_json == "{}" {
        T::default()
    } else {
        serde_json::from_str::<T>(config_json).unwrap_or_else(|_| T::default())
    }
}

/// Generate a WASM wrapper that parses a JSON payload and a JSON config,
/// calls a core function, and maps its error into a `JsValue`.
#[macro_export]
macro_rules! wasm_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident($input:ident: &str, $config:ident: &str)
        -> Result<$result:ty, JsValue>
        with $core_fn:path, $config_type:ty, $result_wrapper:expr
    ) => {
        #[wasm_bindgen]
        $(#[$meta])*
        $vis fn $name($input: &str, $config: &str) -> Result<$result, JsValue> {
            let params = $crate::support::parse_with_defaults::<$config_type>($config);
            $core_fn($input, &params)
                .map($result_wrapper)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }
    };
}
