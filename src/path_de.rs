use serde::de::DeserializeOwned;

/// Where deserialization stopped and why.
pub(crate) struct Located {
    pub path: String,
    pub message: String,
}

fn locate(err: serde_path_to_error::Error<serde_json::Error>) -> Located {
    let path = err.path().to_string();
    Located { path, message: err.into_inner().to_string() }
}

/// Deserialize with JSON-path context in error messages.
pub(crate) fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, Located> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize(de).map_err(locate)
}

pub(crate) fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, Located> {
    serde_path_to_error::deserialize(value).map_err(locate)
}
