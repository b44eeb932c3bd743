//! Canonical field table and alias resolution
//!
//! The website builder sends the same logical field under several spellings
//! accumulated over time: capitalization drift ("Приз_1_текст" vs
//! "приз_1_текст"), punctuation variants ("Картинка 1" vs "Картинка_1"),
//! and numeric suffixes denoting a re-uploaded image slot
//! ("Приз_1_картинка_2"). Each canonical field lists its known aliases in a
//! fixed priority order; when several aliases appear in one payload the
//! first listed alias wins. A re-uploaded slot-2 image therefore always
//! outranks the stale slot-1 URL.
//!
//! Resolution is a case-sensitive exact match against this table. No fuzzy
//! matching: an unrecognized spelling is ignored, never guessed at.

/// Value type of a canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, passed through unchanged
    Text,
    /// Coerced to i64; unparseable input resolves to absent, never zero
    Integer,
    /// Builder-owned identifier, passed through without normalization
    Passthrough,
}

/// A named, typed slot in the locations schema
#[derive(Debug)]
pub struct CanonicalField {
    /// Column name in the locations table (unique)
    pub name: &'static str,
    pub kind: FieldKind,
    /// External spellings, highest priority first
    pub aliases: &'static [&'static str],
}

/// A typed canonical value derived from one payload field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

/// The full canonical field table.
///
/// Order within each alias list is the resolution priority and is load
/// bearing; see module docs. Table order itself only affects iteration
/// order of the transformer output.
pub static CANONICAL_FIELDS: &[CanonicalField] = &[
    CanonicalField {
        name: "name",
        kind: FieldKind::Text,
        aliases: &["Название", "Name"],
    },
    CanonicalField {
        name: "email",
        kind: FieldKind::Text,
        aliases: &["Email"],
    },
    CanonicalField {
        name: "address",
        kind: FieldKind::Text,
        aliases: &["Адрес"],
    },
    // Main image: the "_1" upload slot is the current builder spelling,
    // older forms sent bare or spaced variants
    CanonicalField {
        name: "cover_image",
        kind: FieldKind::Text,
        aliases: &["Картинка_1", "картинка", "Картинка", "Картинка 1"],
    },
    // Time card prices in rubles
    CanonicalField {
        name: "time_card_price_1h",
        kind: FieldKind::Integer,
        aliases: &["тайм-карта_1_часа"],
    },
    CanonicalField {
        name: "time_card_price_2h",
        kind: FieldKind::Integer,
        aliases: &["тайм-карта_2_часа"],
    },
    CanonicalField {
        name: "time_card_price_3h",
        kind: FieldKind::Integer,
        aliases: &["тайм-карта_3_часа"],
    },
    CanonicalField {
        name: "time_card_price_4h",
        kind: FieldKind::Integer,
        aliases: &["тайм-карта_4_часа"],
    },
    CanonicalField {
        name: "time_card_price_5h",
        kind: FieldKind::Integer,
        aliases: &["тайм-карта_5_часов"],
    },
    // Prize texts: upper-case variant is current, lower-case is legacy
    CanonicalField {
        name: "prize_1_text",
        kind: FieldKind::Text,
        aliases: &["Приз_1_текст", "приз_1_текст"],
    },
    CanonicalField {
        name: "prize_2_text",
        kind: FieldKind::Text,
        aliases: &["Приз_2_текст", "приз_2_текст"],
    },
    CanonicalField {
        name: "prize_3_text",
        kind: FieldKind::Text,
        aliases: &["Приз_3_текст", "приз_3_текст"],
    },
    // Prize images: the "_2" suffix marks a re-uploaded slot and takes
    // precedence over the original slot when both arrive in one payload
    CanonicalField {
        name: "prize_1_image",
        kind: FieldKind::Text,
        aliases: &[
            "Приз_1_картинка_2",
            "Приз_1_картинка",
            "приз_1_картинка_2",
            "приз_1_картинка",
        ],
    },
    CanonicalField {
        name: "prize_2_image",
        kind: FieldKind::Text,
        aliases: &[
            "Приз_2_картинка_2",
            "Приз_2_картинка",
            "приз_2_картинка_2",
            "приз_2_картинка",
        ],
    },
    CanonicalField {
        name: "prize_3_image",
        kind: FieldKind::Text,
        aliases: &[
            "Приз_3_картинка_2",
            "Приз_3_картинка",
            "приз_3_картинка_2",
            "приз_3_картинка",
        ],
    },
    CanonicalField {
        name: "prizes_text",
        kind: FieldKind::Text,
        aliases: &["Призы_текст", "призы_текст"],
    },
    // Draw
    CanonicalField {
        name: "top_up_amount",
        kind: FieldKind::Integer,
        aliases: &["Пополнить_карту_на_сумму"],
    },
    CanonicalField {
        name: "next_draw_date",
        kind: FieldKind::Text,
        aliases: &["Дата_следующего_розыгрыша"],
    },
    // Promotions
    CanonicalField {
        name: "thursday_promo_title",
        kind: FieldKind::Text,
        aliases: &["Заголовок_каждый_четверг_ПО_30"],
    },
    CanonicalField {
        name: "thursday_promo_text",
        kind: FieldKind::Text,
        aliases: &["Каждый_четверг_все_по"],
    },
    // Time card prices for page display (separate form fields from the
    // ruble prices above)
    CanonicalField {
        name: "time_card_display_1h",
        kind: FieldKind::Integer,
        aliases: &["Тайм_карта_1_час"],
    },
    CanonicalField {
        name: "time_card_display_2h",
        kind: FieldKind::Integer,
        aliases: &["Тайм_карта_2_час"],
    },
    CanonicalField {
        name: "time_card_display_3h",
        kind: FieldKind::Integer,
        aliases: &["Тайм_карта_3_час"],
    },
    CanonicalField {
        name: "time_card_display_4h",
        kind: FieldKind::Integer,
        aliases: &["Тайм_карта_4_час"],
    },
    CanonicalField {
        name: "time_card_display_5h",
        kind: FieldKind::Integer,
        aliases: &["Тайм_карта_5_час"],
    },
    // Loyalty: deposit amounts and their bonuses
    CanonicalField {
        name: "deposit_1",
        kind: FieldKind::Integer,
        aliases: &["Пополнение_1"],
    },
    CanonicalField {
        name: "bonus_1",
        kind: FieldKind::Integer,
        aliases: &["Бонус_1"],
    },
    CanonicalField {
        name: "deposit_2",
        kind: FieldKind::Integer,
        aliases: &["Пополнение_2"],
    },
    CanonicalField {
        name: "bonus_2",
        kind: FieldKind::Integer,
        aliases: &["Бонус_2"],
    },
    CanonicalField {
        name: "deposit_3",
        kind: FieldKind::Integer,
        aliases: &["Пополнение_3"],
    },
    CanonicalField {
        name: "bonus_3",
        kind: FieldKind::Integer,
        aliases: &["Бонус_3"],
    },
    CanonicalField {
        name: "deposit_4",
        kind: FieldKind::Integer,
        aliases: &["Пополнение_4"],
    },
    CanonicalField {
        name: "bonus_4",
        kind: FieldKind::Integer,
        aliases: &["Бонус_4"],
    },
    CanonicalField {
        name: "deposit_5",
        kind: FieldKind::Integer,
        aliases: &["Пополнение_5"],
    },
    CanonicalField {
        name: "bonus_5",
        kind: FieldKind::Integer,
        aliases: &["Бонус_5"],
    },
    CanonicalField {
        name: "deposit_6",
        kind: FieldKind::Integer,
        aliases: &["Пополнение_6"],
    },
    CanonicalField {
        name: "bonus_6",
        kind: FieldKind::Integer,
        aliases: &["Бонус_6"],
    },
    // Loyalty: accumulation thresholds and their privileges
    CanonicalField {
        name: "tier_threshold_1",
        kind: FieldKind::Integer,
        aliases: &["Накопление_1"],
    },
    CanonicalField {
        name: "tier_privilege_1",
        kind: FieldKind::Text,
        aliases: &["Привилегия_1"],
    },
    CanonicalField {
        name: "tier_threshold_2",
        kind: FieldKind::Integer,
        aliases: &["Накопление_2"],
    },
    CanonicalField {
        name: "tier_privilege_2",
        kind: FieldKind::Text,
        aliases: &["Привилегия_2"],
    },
    CanonicalField {
        name: "tier_threshold_3",
        kind: FieldKind::Integer,
        aliases: &["Накопление_3"],
    },
    CanonicalField {
        name: "tier_privilege_3",
        kind: FieldKind::Text,
        aliases: &["Привилегия_3"],
    },
    CanonicalField {
        name: "tier_threshold_4",
        kind: FieldKind::Integer,
        aliases: &["Накопление_4"],
    },
    CanonicalField {
        name: "tier_privilege_4",
        kind: FieldKind::Text,
        aliases: &["Привилегия_4"],
    },
    // Builder-side submission metadata, consumed as-is
    CanonicalField {
        name: "record_id",
        kind: FieldKind::Passthrough,
        aliases: &["record_id"],
    },
    CanonicalField {
        name: "ma_name",
        kind: FieldKind::Passthrough,
        aliases: &["ma_name"],
    },
    CanonicalField {
        name: "ma_email",
        kind: FieldKind::Passthrough,
        aliases: &["ma_email"],
    },
    CanonicalField {
        name: "tranid",
        kind: FieldKind::Passthrough,
        aliases: &["tranid"],
    },
    CanonicalField {
        name: "formid",
        kind: FieldKind::Passthrough,
        aliases: &["formid"],
    },
];

/// Resolve an external key to its canonical field, or None if unrecognized
pub fn resolve(external_key: &str) -> Option<&'static CanonicalField> {
    CANONICAL_FIELDS
        .iter()
        .find(|field| field.aliases.contains(&external_key))
}

/// Look up a canonical field by its canonical name
pub fn by_name(name: &str) -> Option<&'static CanonicalField> {
    CANONICAL_FIELDS.iter().find(|field| field.name == name)
}

/// Strings the builder sends when a form field is empty or was never filled
/// in. They mean "no value", not the literal text.
fn is_absent_sentinel(raw: &str) -> bool {
    raw.is_empty() || raw == "null" || raw == "undefined"
}

/// Coerce a raw external string to the field's typed value.
///
/// Absent sentinels resolve to None for every kind. Integer fields
/// additionally resolve to None on parse failure: a malformed price must
/// not abort the submission, and must not silently become a zero.
pub fn coerce(field: &CanonicalField, raw: &str) -> Option<FieldValue> {
    if is_absent_sentinel(raw) {
        return None;
    }
    match field.kind {
        FieldKind::Text | FieldKind::Passthrough => Some(FieldValue::Text(raw.to_string())),
        FieldKind::Integer => raw.trim().parse::<i64>().ok().map(FieldValue::Integer),
    }
}
