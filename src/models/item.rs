use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/600x400?text=No+Image";
pub const UNKNOWN_GAME_NAME: &str = "Unknown game";
pub const FREE_PRICE_LABEL: &str = "Free";
const CURRENCY_CODE: &str = "Mxn";

// Legacy aliases, tried in order. The remote API mixes naming schemes between endpoints.
const ID_FIELDS: &[&str] = &["id", "appid", "game_id"];
const NAME_FIELDS: &[&str] = &["name", "nombre"];
const DESCRIPTION_FIELDS: &[&str] = &["description", "descripcion_corta"];
const IMAGE_FIELDS: &[&str] = &["portada", "img_url"];
const PRICE_FIELDS: &[&str] = &["price", "precio"];

/// Opaque recommendation record as returned by the remote API
///
/// The resolver never looks inside; presentation code reads it through the
/// canonical accessors below, which normalize the legacy field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationItem(pub Map<String, Value>);

/// The game a recommendation was derived from (association rules only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasedOn {
    pub id: u64,
    pub name: String,
}

impl RecommendationItem {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// First non-null value among the given field names
    fn first_of(&self, fields: &[&str]) -> Option<&Value> {
        first_of(&self.0, fields)
    }

    pub fn game_id(&self) -> Option<u64> {
        self.first_of(ID_FIELDS).and_then(value_as_u64)
    }

    pub fn name(&self) -> Option<&str> {
        self.first_of(NAME_FIELDS).and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.first_of(DESCRIPTION_FIELDS).and_then(Value::as_str)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.first_of(IMAGE_FIELDS)
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Display price: the upstream pre-formatted price when present, else a formatted number
    pub fn price_label(&self) -> String {
        if let Some(formatted) = self
            .get("resumen_precio")
            .and_then(|summary| summary.get("final_formatted"))
            .and_then(Value::as_str)
        {
            return strip_currency_code(formatted);
        }

        format_price(self.first_of(PRICE_FIELDS).and_then(Value::as_f64))
    }

    /// Up to `limit` tag descriptions, in upstream order
    pub fn tags(&self, limit: usize) -> Vec<String> {
        self.get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| match tag {
                        Value::String(s) => Some(s.as_str()),
                        other => other.get("description").and_then(Value::as_str),
                    })
                    .take(limit)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First entry of `based_on_games`, if it carries both an id and a name
    pub fn based_on(&self) -> Option<BasedOn> {
        let first = self.get("based_on_games")?.as_array()?.first()?.as_object()?;
        let id = first_of(first, ID_FIELDS).and_then(value_as_u64)?;
        let name = first_of(first, NAME_FIELDS).and_then(Value::as_str)?;

        Some(BasedOn {
            id,
            name: name.to_string(),
        })
    }
}

impl From<Map<String, Value>> for RecommendationItem {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn first_of<'a>(map: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| map.get(*field))
        .find(|value| !value.is_null())
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Formats a price for display; absent or zero means free
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p > 0.0 => format!("${:.2}", p),
        _ => FREE_PRICE_LABEL.to_string(),
    }
}

/// Removes every `Mxn` currency code, and the whitespace after it, from a formatted price
pub fn strip_currency_code(formatted: &str) -> String {
    let mut out = String::with_capacity(formatted.len());
    let mut rest = formatted;
    while let Some(pos) = rest.find(CURRENCY_CODE) {
        out.push_str(&rest[..pos]);
        rest = rest[pos + CURRENCY_CODE.len()..].trim_start();
    }
    out.push_str(rest);
    out
}

/// Cuts `text` to `max_chars` characters, appending an ellipsis when shortened
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> RecommendationItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_id_aliases_in_order() {
        assert_eq!(item(json!({"id": 7})).game_id(), Some(7));
        assert_eq!(item(json!({"appid": 570})).game_id(), Some(570));
        assert_eq!(item(json!({"game_id": "730"})).game_id(), Some(730));
        assert_eq!(item(json!({"id": null, "appid": 10})).game_id(), Some(10));
        assert_eq!(item(json!({"title": "x"})).game_id(), None);
    }

    #[test]
    fn test_name_and_description_aliases() {
        let legacy = item(json!({"nombre": "Hades", "descripcion_corta": "Roguelike"}));
        assert_eq!(legacy.name(), Some("Hades"));
        assert_eq!(legacy.description(), Some("Roguelike"));

        let canonical = item(json!({"name": "Celeste", "nombre": "ignored"}));
        assert_eq!(canonical.name(), Some("Celeste"));
    }

    #[test]
    fn test_price_label() {
        let formatted = item(json!({"resumen_precio": {"final_formatted": "19,99€"}}));
        assert_eq!(formatted.price_label(), "19,99€");

        assert_eq!(item(json!({"price": 9.5})).price_label(), "$9.50");
        assert_eq!(item(json!({"price": 0.0})).price_label(), "Free");
        assert_eq!(item(json!({})).price_label(), "Free");
    }

    #[test]
    fn test_price_label_drops_currency_code() {
        let mxn = item(json!({"resumen_precio": {"final_formatted": "Mxn $199.00"}}));
        assert_eq!(mxn.price_label(), "$199.00");

        assert_eq!(strip_currency_code("Mxn  $5 Mxn$6"), "$5 $6");
        assert_eq!(strip_currency_code("$9.99"), "$9.99");
    }

    #[test]
    fn test_tags_are_capped() {
        let tagged = item(json!({
            "tags": [
                {"id": 1, "description": "Action"},
                {"id": 2, "description": "Shooter"},
                {"id": 3},
                "Co-op",
                {"id": 4, "description": "Sci-fi"},
                {"id": 5, "description": "Multiplayer"}
            ]
        }));
        assert_eq!(tagged.tags(4), vec!["Action", "Shooter", "Co-op", "Sci-fi"]);

        assert!(item(json!({"tags": null})).tags(4).is_empty());
        assert!(item(json!({})).tags(4).is_empty());
    }

    #[test]
    fn test_based_on_requires_id_and_name() {
        let with_reason = item(json!({
            "id": 1,
            "based_on_games": [{"id": 20, "nombre": "Portal"}, {"id": 21, "nombre": "Portal 2"}]
        }));
        assert_eq!(
            with_reason.based_on(),
            Some(BasedOn {
                id: 20,
                name: "Portal".to_string()
            })
        );

        let missing_name = item(json!({"based_on_games": [{"id": 20}]}));
        assert_eq!(missing_name.based_on(), None);

        let empty = item(json!({"based_on_games": []}));
        assert_eq!(empty.based_on(), None);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Portal", 25), "Portal");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("ñandú", 2), "ña...");
    }
}
