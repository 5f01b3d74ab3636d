use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::{GameCard, Slot, SlotResult, SourceLabel, Viewer},
    services::resolver::RecommendationSourceResolver,
};

const EMPTY_CAROUSEL_MESSAGE: &str = "No games to show in this carousel.";

/// How a slot's carousel lays out its cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CarouselLayout {
    /// One large card per slide
    SingleItem,
    /// Several cards per slide, with association reasons
    MultiItem,
    /// Several cards per slide with descriptions
    Grouped,
}

impl CarouselLayout {
    pub fn for_slot(slot: Slot) -> Self {
        match slot {
            Slot::Featured => CarouselLayout::SingleItem,
            Slot::Popular => CarouselLayout::MultiItem,
            Slot::Adventure | Slot::Action => CarouselLayout::Grouped,
        }
    }

    pub fn items_per_slide(&self) -> usize {
        match self {
            CarouselLayout::SingleItem => 1,
            CarouselLayout::MultiItem | CarouselLayout::Grouped => 3,
        }
    }
}

/// Everything the page needs to draw one slot
#[derive(Debug, Clone, Serialize)]
pub struct SlotView {
    pub slot: Slot,
    pub label: SourceLabel,
    pub title: String,
    pub visible: bool,
    pub layout: CarouselLayout,
    pub slides: Vec<Vec<GameCard>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub label: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountMenu {
    pub greeting: String,
    pub entries: Vec<MenuEntry>,
}

impl AccountMenu {
    pub fn for_viewer(viewer: &Viewer, display_name: Option<&str>) -> Self {
        let entry = |label: &str, action: &str| MenuEntry {
            label: label.to_string(),
            action: action.to_string(),
        };

        match viewer {
            Viewer::Authenticated(_) => Self {
                greeting: match display_name.map(str::trim).filter(|n| !n.is_empty()) {
                    Some(name) => format!("Hello, {}", name),
                    None => "Account".to_string(),
                },
                entries: vec![entry("Log out", "logout")],
            },
            Viewer::Anonymous => Self {
                greeting: "Account".to_string(),
                entries: vec![entry("Log in", "login"), entry("Sign up", "register")],
            },
        }
    }
}

/// The landing page: account menu plus the four slots
#[derive(Debug, Clone, Serialize)]
pub struct HomeFeed {
    pub authenticated: bool,
    pub account: AccountMenu,
    pub slots: Vec<SlotView>,
    pub generated_at: DateTime<Utc>,
}

/// Heading shown above a slot for the strategy that filled it
pub fn slot_title(slot: Slot, label: SourceLabel) -> &'static str {
    match (slot, label) {
        (Slot::Featured, SourceLabel::CollaborativeUserBased) => {
            "Games other players enjoyed that you might like"
        }
        (Slot::Featured, SourceLabel::ColdStart) => "Based on what you told us about yourself",
        (Slot::Featured, _) => "New in 2025",
        (Slot::Popular, SourceLabel::Association) => "Matching your taste",
        (Slot::Popular, SourceLabel::TopRatedFallback) => "Top Rated by Players",
        (Slot::Popular, _) => "Most Played by Players",
        (Slot::Adventure, SourceLabel::ItemBased) => "Picked by players with tastes like yours",
        (Slot::Adventure, SourceLabel::TopRatedFallback) => "Top rated games",
        (Slot::Adventure, _) => "Explore Adventure",
        (Slot::Action, SourceLabel::ContentBased) => "Based on the stories you enjoy",
        (Slot::Action, _) => "Action",
    }
}

/// Whether the page should show the slot at all
pub fn is_visible(result: &SlotResult, viewer: &Viewer) -> bool {
    match result.slot {
        Slot::Featured | Slot::Popular => true,
        Slot::Adventure => !(viewer.is_authenticated() && result.is_empty()),
        Slot::Action => result.label == SourceLabel::ContentBased && !result.is_empty(),
    }
}

/// Lays resolved items out as carousel slides
pub fn render_slot(result: SlotResult, viewer: &Viewer) -> SlotView {
    let layout = CarouselLayout::for_slot(result.slot);
    let visible = is_visible(&result, viewer);
    let with_reasons =
        layout == CarouselLayout::MultiItem && result.label == SourceLabel::Association;

    let cards: Vec<GameCard> = result
        .items
        .iter()
        .map(|item| match layout {
            CarouselLayout::MultiItem if with_reasons => GameCard::with_reason(item),
            CarouselLayout::Grouped => GameCard::with_tags(item),
            _ => GameCard::from_item(item),
        })
        .collect();

    let slides: Vec<Vec<GameCard>> = cards
        .chunks(layout.items_per_slide())
        .map(<[GameCard]>::to_vec)
        .collect();

    SlotView {
        slot: result.slot,
        label: result.label,
        title: slot_title(result.slot, result.label).to_string(),
        visible,
        layout,
        empty_message: slides
            .is_empty()
            .then(|| EMPTY_CAROUSEL_MESSAGE.to_string()),
        slides,
    }
}

/// Resolves every slot and builds the landing page
pub async fn build_home_feed(
    resolver: &RecommendationSourceResolver,
    viewer: &Viewer,
    display_name: Option<&str>,
) -> HomeFeed {
    let results = resolver.resolve_all(viewer).await;

    let slots: Vec<SlotView> = results
        .into_iter()
        .map(|result| render_slot(result, viewer))
        .collect();

    tracing::info!(
        viewer = %viewer,
        visible_slots = slots.iter().filter(|s| s.visible).count(),
        "Home feed built"
    );

    HomeFeed {
        authenticated: viewer.is_authenticated(),
        account: AccountMenu::for_viewer(viewer, display_name),
        slots,
        generated_at: Utc::now(),
    }
}

/// Re-resolves a single slot, e.g. after the viewer logs in
pub async fn refresh_slot(
    resolver: &RecommendationSourceResolver,
    slot: Slot,
    viewer: &Viewer,
) -> SlotView {
    render_slot(resolver.resolve(slot, viewer).await, viewer)
}
