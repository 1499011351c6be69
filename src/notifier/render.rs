use serde::Serialize;

use crate::domain::{RankUpdateEvent, tier_family, tier_name};

const COLOR_TARGET_REACHED: u32 = 0x2ECC71;
const COLOR_UPDATE: u32 = 0x5865F2;
const PROGRESS_BAR_CELLS: usize = 10;

/// Discord embed payload
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub timestamp: String,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn new(name: &str, value: String, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value,
            inline,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

/// Build the embed announcing a rank update
pub fn build_embed(event: &RankUpdateEvent) -> Embed {
    let rank = &event.new_rank_state;
    let emoji = rank_emoji(&rank.tier_name);

    let (title, color) = if event.target_reached() {
        (
            format!("{} {} — {}+ reached!", emoji, event.identity, tier_name(event.target_tier)),
            COLOR_TARGET_REACHED,
        )
    } else {
        (format!("{} {} — Rank update", emoji, event.identity), COLOR_UPDATE)
    };

    let mut fields = vec![EmbedField::new(
        "🎯 Current rank",
        format!("**{}** — {} RR", rank.tier_name, rank.points_in_tier),
        true,
    )];

    if let Some(delta) = event.points_delta {
        fields.push(EmbedField::new(
            "📊 Last match",
            format!("{} ({:+} RR)", match_outcome(delta), delta),
            true,
        ));
    }

    if let Some(map) = &rank.map_name {
        fields.push(EmbedField::new("🗺️ Map", map.clone(), true));
    }

    fields.push(target_field(event));

    Embed {
        title,
        color,
        timestamp: event.observed_at.to_rfc3339(),
        fields,
        footer: EmbedFooter {
            text: format!("Rank Tracker • {}", event.identity),
        },
    }
}

fn target_field(event: &RankUpdateEvent) -> EmbedField {
    let target = tier_name(event.target_tier);

    match (event.points_to_target, event.progress_percent) {
        (Some(remaining), Some(percent)) => EmbedField::new(
            &format!("🏆 Before {}", target),
            format!(
                "**{} RR remaining**\n{} {}%",
                remaining,
                progress_bar(percent),
                percent
            ),
            false,
        ),
        _ => EmbedField::new(
            "🏆 Status",
            format!("Already **{} or higher**! GG 🎉", target),
            false,
        ),
    }
}

/// Emoji for the tier family, falling back to a generic one
pub fn rank_emoji(tier_name: &str) -> &'static str {
    match tier_family(tier_name) {
        "Iron" => "🩶",
        "Bronze" => "🟤",
        "Silver" => "⚪",
        "Gold" => "🟡",
        "Platinum" => "🩵",
        "Diamond" => "💎",
        "Ascendant" => "🟢",
        "Immortal" => "🔴",
        "Radiant" => "✨",
        "Unranked" => "⬛",
        _ => "🎮",
    }
}

pub fn match_outcome(delta: i32) -> &'static str {
    match delta {
        d if d > 0 => "✅ Victory",
        d if d < 0 => "❌ Defeat",
        _ => "🤝 Draw",
    }
}

/// Ten-cell bar, one filled cell per full 10%
pub fn progress_bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) / 10).min(PROGRESS_BAR_CELLS);
    "🟩".repeat(filled) + &"⬛".repeat(PROGRESS_BAR_CELLS - filled)
}
