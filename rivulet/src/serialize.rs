// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use serde_json::{Map as JsonMap, Value as JsonValue};

pub trait SerializeJson {
    fn to_json(&self) -> Result<JsonValue, String>;
}

impl<T: SerializeJson> SerializeJson for [T] {
    fn to_json(&self) -> Result<JsonValue, String> {
        self.iter()
            .map(|item| item.to_json())
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array)
    }
}

impl<T: SerializeJson> SerializeJson for Vec<T> {
    fn to_json(&self) -> Result<JsonValue, String> {
        self.as_slice().to_json()
    }
}

pub fn json_object(
    entries: impl IntoIterator<Item = (&'static str, JsonValue)>,
) -> JsonValue {
    JsonValue::Object(JsonMap::from_iter(
        entries
            .into_iter()
            .map(|(key, value)| (String::from(key), value)),
    ))
}
