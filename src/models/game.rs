use serde::{Deserialize, Serialize};

use super::item::{
    format_price, truncate_text, BasedOn, RecommendationItem, PLACEHOLDER_IMAGE_URL,
    UNKNOWN_GAME_NAME,
};

const CATALOG_PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/460x215?text=No+Image";
const REASON_NAME_MAX_CHARS: usize = 25;
const CARD_DESCRIPTION_MAX_CHARS: usize = 100;
const CARD_MAX_TAGS: usize = 4;

/// Game as listed in the catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameSummary {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: Option<f64>,
    pub price_label: String,
    pub release_date: String,
}

impl GameSummary {
    /// Case-insensitive substring match on the game name
    pub fn matches(&self, lowercase_query: &str) -> bool {
        self.name.to_lowercase().contains(lowercase_query)
    }
}

/// Full game record shown on the product page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameDetails {
    pub id: u64,
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub release_date: String,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub minimum_age_label: String,
    pub price_label: String,
    pub screenshots: Vec<String>,
}

/// One page of the catalog listing
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub games: Vec<GameSummary>,
    pub total: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Card shown inside a carousel
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GameCard {
    pub id: Option<u64>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: String,
    pub price_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<BasedOn>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl GameCard {
    pub fn from_item(item: &RecommendationItem) -> Self {
        Self {
            id: item.game_id(),
            name: item.name().unwrap_or(UNKNOWN_GAME_NAME).to_string(),
            description: item
                .description()
                .map(|d| truncate_text(d, CARD_DESCRIPTION_MAX_CHARS)),
            image_url: item.image_url().unwrap_or(PLACEHOLDER_IMAGE_URL).to_string(),
            price_label: item.price_label(),
            reason: None,
            tags: Vec::new(),
        }
    }

    /// Card carrying the item's leading tags, for grouped carousels
    pub fn with_tags(item: &RecommendationItem) -> Self {
        let mut card = Self::from_item(item);
        card.tags = item.tags(CARD_MAX_TAGS);
        card
    }

    /// Card with a "because you liked" reason taken from the item's provenance
    pub fn with_reason(item: &RecommendationItem) -> Self {
        let mut card = Self::from_item(item);
        card.reason = item.based_on().map(|based_on| BasedOn {
            id: based_on.id,
            name: truncate_text(&based_on.name, REASON_NAME_MAX_CHARS),
        });
        card
    }
}

// ============================================================================
// Remote API Types
// ============================================================================

/// Raw catalog entry from the remote API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCatalogGame {
    #[serde(alias = "id", alias = "game_id")]
    pub appid: u64,
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "descripcion_corta")]
    pub description: Option<String>,
    #[serde(default, alias = "portada")]
    pub img_url: Option<String>,
    #[serde(default, alias = "precio")]
    pub price: Option<f64>,
    #[serde(default, alias = "fecha_publicacion")]
    pub release_date: Option<String>,
}

impl From<ApiCatalogGame> for GameSummary {
    fn from(game: ApiCatalogGame) -> Self {
        GameSummary {
            id: game.appid,
            name: game.name.unwrap_or_else(|| UNKNOWN_GAME_NAME.to_string()),
            description: game
                .description
                .unwrap_or_else(|| "No description available.".to_string()),
            image_url: game
                .img_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| CATALOG_PLACEHOLDER_IMAGE_URL.to_string()),
            price_label: format_price(game.price),
            price: game.price,
            release_date: game
                .release_date
                .unwrap_or_else(|| "Unknown date".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPriceSummary {
    #[serde(default)]
    pub final_formatted: Option<String>,
}

/// Raw game record from the remote API detail endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiGameDetails {
    pub id: u64,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub descripcion_corta: Option<String>,
    #[serde(default)]
    pub descripcion_larga: Option<String>,
    #[serde(default)]
    pub fecha_publicacion: Option<String>,
    #[serde(default)]
    pub desarrolladores: Vec<String>,
    #[serde(default)]
    pub publicadores: Vec<String>,
    #[serde(default)]
    pub edad_minima: u32,
    #[serde(default)]
    pub resumen_precio: Option<ApiPriceSummary>,
    #[serde(default)]
    pub capturas: Vec<String>,
    #[serde(default)]
    pub portada: Option<String>,
}

impl From<ApiGameDetails> for GameDetails {
    fn from(game: ApiGameDetails) -> Self {
        // Fall back to the cover image when there are no screenshots
        let screenshots = if game.capturas.is_empty() {
            game.portada.into_iter().filter(|url| !url.is_empty()).collect()
        } else {
            game.capturas
        };

        GameDetails {
            id: game.id,
            name: game.nombre.unwrap_or_else(|| "Name not available".to_string()),
            short_description: game
                .descripcion_corta
                .unwrap_or_else(|| "Short description not available.".to_string()),
            long_description: game
                .descripcion_larga
                .unwrap_or_else(|| "Long description not available.".to_string()),
            release_date: game.fecha_publicacion.unwrap_or_else(|| "N/A".to_string()),
            developers: game.desarrolladores,
            publishers: game.publicadores,
            minimum_age_label: if game.edad_minima > 0 {
                format!("{}+", game.edad_minima)
            } else {
                "All ages".to_string()
            },
            price_label: game
                .resumen_precio
                .and_then(|p| p.final_formatted)
                .unwrap_or_else(|| format_price(None)),
            screenshots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_game_conversion() {
        let raw: ApiCatalogGame = serde_json::from_value(json!({
            "appid": 570,
            "name": "Dota 2",
            "description": "MOBA",
            "img_url": "https://img/570.jpg",
            "price": 0.0,
            "release_date": "9 Jul, 2013"
        }))
        .unwrap();

        let game = GameSummary::from(raw);
        assert_eq!(game.id, 570);
        assert_eq!(game.price_label, "Free");
        assert!(game.matches("dota"));
        assert!(!game.matches("portal"));
    }

    #[test]
    fn test_catalog_game_legacy_fields_and_defaults() {
        let raw: ApiCatalogGame =
            serde_json::from_value(json!({"id": 10, "nombre": "Counter-Strike", "precio": 9.99}))
                .unwrap();

        let game = GameSummary::from(raw);
        assert_eq!(game.name, "Counter-Strike");
        assert_eq!(game.price_label, "$9.99");
        assert_eq!(game.image_url, CATALOG_PLACEHOLDER_IMAGE_URL);
        assert_eq!(game.release_date, "Unknown date");
    }

    #[test]
    fn test_game_details_conversion() {
        let raw: ApiGameDetails = serde_json::from_value(json!({
            "id": 620,
            "nombre": "Portal 2",
            "descripcion_corta": "Puzzles",
            "desarrolladores": ["Valve"],
            "edad_minima": 12,
            "resumen_precio": {"final_formatted": "$9.99"},
            "portada": "https://img/620.jpg"
        }))
        .unwrap();

        let details = GameDetails::from(raw);
        assert_eq!(details.name, "Portal 2");
        assert_eq!(details.minimum_age_label, "12+");
        assert_eq!(details.price_label, "$9.99");
        assert_eq!(details.screenshots, vec!["https://img/620.jpg".to_string()]);
        assert_eq!(details.long_description, "Long description not available.");
    }

    #[test]
    fn test_card_reason_is_truncated() {
        let item: RecommendationItem = serde_json::from_value(json!({
            "id": 3,
            "nombre": "Stardew Valley",
            "based_on_games": [{"id": 4, "nombre": "The Elder Scrolls V: Skyrim Special Edition"}]
        }))
        .unwrap();

        let plain = GameCard::from_item(&item);
        assert_eq!(plain.reason, None);

        let card = GameCard::with_reason(&item);
        let reason = card.reason.unwrap();
        assert_eq!(reason.id, 4);
        assert_eq!(reason.name, "The Elder Scrolls V: Skyr...");
    }

    #[test]
    fn test_card_tags_only_when_requested() {
        let item: RecommendationItem = serde_json::from_value(json!({
            "id": 730,
            "nombre": "Counter-Strike 2",
            "resumen_precio": {"final_formatted": "Mxn Free"},
            "tags": ["FPS", "Shooter", "Multiplayer", "Competitive", "Action", "Team-Based"]
        }))
        .unwrap();

        let plain = GameCard::from_item(&item);
        assert!(plain.tags.is_empty());
        assert!(serde_json::to_value(&plain).unwrap().get("tags").is_none());

        let card = GameCard::with_tags(&item);
        assert_eq!(card.tags, vec!["FPS", "Shooter", "Multiplayer", "Competitive"]);
        assert_eq!(card.price_label, "Free");
    }
}
