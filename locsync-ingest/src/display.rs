//! Display-name mapping for the content-fetch API
//!
//! The consuming page templates address fields by their own historical
//! variable names ("1h-card", "vznos3", "every30", even "600" for the
//! top-up amount). This module is the one-way map from canonical storage
//! names to those display names. It must stay in lockstep with the
//! canonical field table: every stored field (metadata aside) has exactly
//! one display name, enforced by tests below, so nothing is silently lost
//! between ingestion and rendering.

use locsync_common::db::LocationRecord;
use serde_json::{Map, Value};

/// Canonical storage name -> template-facing display name
pub static DISPLAY_FIELDS: &[(&str, &str)] = &[
    ("name", "title"),
    ("email", "email"),
    ("address", "address"),
    ("cover_image", "cover_image"),
    ("time_card_price_1h", "1h-card"),
    ("time_card_price_2h", "2h-card"),
    ("time_card_price_3h", "3h-card"),
    ("time_card_price_4h", "4h-card"),
    ("time_card_price_5h", "5h-card"),
    ("prize_1_text", "prizetxt1"),
    ("prize_2_text", "prizetxt2"),
    ("prize_3_text", "prizetxt3"),
    ("prize_1_image", "prizeimg1"),
    ("prize_2_image", "prizeimg2"),
    ("prize_3_image", "prizeimg3"),
    ("prizes_text", "prizealltxt"),
    // "600" is the template's historical name for the top-up amount block
    ("top_up_amount", "600"),
    ("next_draw_date", "nextdate"),
    ("thursday_promo_title", "every30"),
    ("thursday_promo_text", "akciatxt"),
    ("time_card_display_1h", "time-card1"),
    ("time_card_display_2h", "time-card2"),
    ("time_card_display_3h", "time-card3"),
    ("time_card_display_4h", "time-card4"),
    ("time_card_display_5h", "time-card5"),
    ("deposit_1", "vznos1"),
    ("deposit_2", "vznos2"),
    ("deposit_3", "vznos3"),
    ("deposit_4", "vznos4"),
    ("deposit_5", "vznos5"),
    ("deposit_6", "vznos6"),
    ("bonus_1", "bonus1"),
    ("bonus_2", "bonus2"),
    ("bonus_3", "bonus3"),
    ("bonus_4", "bonus4"),
    ("bonus_5", "bonus5"),
    ("bonus_6", "bonus6"),
    ("tier_threshold_1", "nakoplenie1"),
    ("tier_threshold_2", "nakoplenie2"),
    ("tier_threshold_3", "nakoplenie3"),
    ("tier_threshold_4", "nakoplenie4"),
    ("tier_privilege_1", "privilege1"),
    ("tier_privilege_2", "privilege2"),
    ("tier_privilege_3", "privilege3"),
    ("tier_privilege_4", "privilege4"),
];

fn text(value: &Option<String>) -> Value {
    Value::String(value.clone().unwrap_or_default())
}

fn number(value: &Option<i64>) -> Value {
    // Templates render an absent number as empty text, matching how the
    // pages have always treated missing prices
    match value {
        Some(n) => Value::Number((*n).into()),
        None => Value::String(String::new()),
    }
}

/// Value of a canonical field on a record, by canonical name
fn canonical_value(record: &LocationRecord, name: &str) -> Value {
    match name {
        "name" => text(&record.name),
        "email" => text(&record.email),
        "address" => text(&record.address),
        "cover_image" => text(&record.cover_image),
        "time_card_price_1h" => number(&record.time_card_price_1h),
        "time_card_price_2h" => number(&record.time_card_price_2h),
        "time_card_price_3h" => number(&record.time_card_price_3h),
        "time_card_price_4h" => number(&record.time_card_price_4h),
        "time_card_price_5h" => number(&record.time_card_price_5h),
        "prize_1_text" => text(&record.prize_1_text),
        "prize_2_text" => text(&record.prize_2_text),
        "prize_3_text" => text(&record.prize_3_text),
        "prize_1_image" => text(&record.prize_1_image),
        "prize_2_image" => text(&record.prize_2_image),
        "prize_3_image" => text(&record.prize_3_image),
        "prizes_text" => text(&record.prizes_text),
        "top_up_amount" => number(&record.top_up_amount),
        "next_draw_date" => text(&record.next_draw_date),
        "thursday_promo_title" => text(&record.thursday_promo_title),
        "thursday_promo_text" => text(&record.thursday_promo_text),
        "time_card_display_1h" => number(&record.time_card_display_1h),
        "time_card_display_2h" => number(&record.time_card_display_2h),
        "time_card_display_3h" => number(&record.time_card_display_3h),
        "time_card_display_4h" => number(&record.time_card_display_4h),
        "time_card_display_5h" => number(&record.time_card_display_5h),
        "deposit_1" => number(&record.deposit_1),
        "deposit_2" => number(&record.deposit_2),
        "deposit_3" => number(&record.deposit_3),
        "deposit_4" => number(&record.deposit_4),
        "deposit_5" => number(&record.deposit_5),
        "deposit_6" => number(&record.deposit_6),
        "bonus_1" => number(&record.bonus_1),
        "bonus_2" => number(&record.bonus_2),
        "bonus_3" => number(&record.bonus_3),
        "bonus_4" => number(&record.bonus_4),
        "bonus_5" => number(&record.bonus_5),
        "bonus_6" => number(&record.bonus_6),
        "tier_threshold_1" => number(&record.tier_threshold_1),
        "tier_threshold_2" => number(&record.tier_threshold_2),
        "tier_threshold_3" => number(&record.tier_threshold_3),
        "tier_threshold_4" => number(&record.tier_threshold_4),
        "tier_privilege_1" => text(&record.tier_privilege_1),
        "tier_privilege_2" => text(&record.tier_privilege_2),
        "tier_privilege_3" => text(&record.tier_privilege_3),
        "tier_privilege_4" => text(&record.tier_privilege_4),
        _ => Value::Null,
    }
}

/// Project one record into the display-facing shape the page templates
/// consume, plus identifying metadata.
pub fn display_record(record: &LocationRecord) -> Map<String, Value> {
    let mut out = Map::new();
    for (canonical, display) in DISPLAY_FIELDS {
        out.insert(display.to_string(), canonical_value(record, canonical));
    }
    out.insert("id".to_string(), Value::String(record.guid.clone()));
    out.insert(
        "record_id".to_string(),
        record
            .record_id
            .clone()
            .map(Value::String)
            .unwrap_or(Value::Null),
    );
    out.insert(
        "created_at".to_string(),
        Value::String(record.created_at.to_string()),
    );
    out.insert(
        "updated_at".to_string(),
        Value::String(record.updated_at.to_string()),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fields::{FieldKind, CANONICAL_FIELDS};

    #[test]
    fn display_map_covers_every_stored_canonical_field() {
        for field in CANONICAL_FIELDS {
            if field.kind == FieldKind::Passthrough {
                continue;
            }
            assert!(
                DISPLAY_FIELDS.iter().any(|(c, _)| *c == field.name),
                "canonical field '{}' has no display name",
                field.name
            );
        }
    }

    #[test]
    fn display_map_references_only_real_canonical_fields() {
        for (canonical, _) in DISPLAY_FIELDS {
            assert!(
                CANONICAL_FIELDS.iter().any(|f| f.name == *canonical),
                "display map references unknown canonical field '{}'",
                canonical
            );
        }
    }

    #[test]
    fn display_names_are_unique() {
        for (i, (_, a)) in DISPLAY_FIELDS.iter().enumerate() {
            for (_, b) in &DISPLAY_FIELDS[i + 1..] {
                assert_ne!(a, b, "duplicate display name");
            }
        }
    }
}
