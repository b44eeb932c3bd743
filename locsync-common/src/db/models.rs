//! Database models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A persisted business location.
///
/// Every canonical field is nullable because webhook deliveries are partial:
/// the row accumulates data across deliveries and the reconciler never
/// erases a stored value with an empty incoming one.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LocationRecord {
    /// Internal identity
    pub guid: String,
    /// External identifier owned by the website builder (reconciliation key)
    pub record_id: Option<String>,

    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub cover_image: Option<String>,

    // Time card prices (rubles)
    pub time_card_price_1h: Option<i64>,
    pub time_card_price_2h: Option<i64>,
    pub time_card_price_3h: Option<i64>,
    pub time_card_price_4h: Option<i64>,
    pub time_card_price_5h: Option<i64>,

    // Prizes
    pub prize_1_text: Option<String>,
    pub prize_2_text: Option<String>,
    pub prize_3_text: Option<String>,
    pub prize_1_image: Option<String>,
    pub prize_2_image: Option<String>,
    pub prize_3_image: Option<String>,
    pub prizes_text: Option<String>,

    // Draw
    pub top_up_amount: Option<i64>,
    pub next_draw_date: Option<String>,

    // Promotions
    pub thursday_promo_title: Option<String>,
    pub thursday_promo_text: Option<String>,

    // Time card prices for page display
    pub time_card_display_1h: Option<i64>,
    pub time_card_display_2h: Option<i64>,
    pub time_card_display_3h: Option<i64>,
    pub time_card_display_4h: Option<i64>,
    pub time_card_display_5h: Option<i64>,

    // Loyalty: deposit tiers and their bonuses
    pub deposit_1: Option<i64>,
    pub bonus_1: Option<i64>,
    pub deposit_2: Option<i64>,
    pub bonus_2: Option<i64>,
    pub deposit_3: Option<i64>,
    pub bonus_3: Option<i64>,
    pub deposit_4: Option<i64>,
    pub bonus_4: Option<i64>,
    pub deposit_5: Option<i64>,
    pub bonus_5: Option<i64>,
    pub deposit_6: Option<i64>,
    pub bonus_6: Option<i64>,

    // Loyalty: accumulation thresholds and their privileges
    pub tier_threshold_1: Option<i64>,
    pub tier_privilege_1: Option<String>,
    pub tier_threshold_2: Option<i64>,
    pub tier_privilege_2: Option<String>,
    pub tier_threshold_3: Option<i64>,
    pub tier_privilege_3: Option<String>,
    pub tier_threshold_4: Option<i64>,
    pub tier_privilege_4: Option<String>,

    // Builder-side submission metadata
    pub ma_name: Option<String>,
    pub ma_email: Option<String>,
    pub tranid: Option<String>,
    pub formid: Option<String>,

    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
