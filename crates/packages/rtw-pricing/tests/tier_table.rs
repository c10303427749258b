use rtw_domain::{Money, TierCategory, TierFamily};
use rtw_pricing::{CampaignTimezone, TierTable, campaign_date};
use time::macros::{date, datetime};

const TIERS: &str = r#"
[
    {"category": "basic", "price": 100, "takes_effect_on": "2024-01-01"},
    {"category": "basic", "price": 150, "takes_effect_on": "2024-06-01"},
    {"category": "basic_with_reward", "price": 300, "takes_effect_on": "2024-01-01"},
    {"category": "basic_with_reward", "price": 350, "takes_effect_on": "2024-06-01"},
    {"category": "company", "price": 1000, "takes_effect_on": "2024-01-01"},
    {"category": "school_with_reward", "price": 200, "takes_effect_on": "2024-02-01"},
    {"category": "team", "price": 50, "takes_effect_on": "2024-01-01"}
]
"#;

#[test]
fn test_resolution_around_tier_boundary() {
    let table = TierTable::from_json(TIERS).unwrap();

    let before = table.resolve(TierFamily::Plain, date!(2024 - 05 - 31));
    assert_eq!(before.price(TierCategory::Basic), Money::new(100));

    let on = table.resolve(TierFamily::Plain, date!(2024 - 06 - 01));
    assert_eq!(on.price(TierCategory::Basic), Money::new(150));

    let earlier = table.resolve(TierFamily::Plain, date!(2023 - 12 - 31));
    assert!(earlier.get(TierCategory::Basic).is_placeholder());
    assert_eq!(earlier.price(TierCategory::Basic), Money::ZERO);
}

#[test]
fn test_every_category_resolves() {
    let table = TierTable::from_json(TIERS).unwrap();
    for as_of in [
        date!(2000 - 01 - 01),
        date!(2024 - 02 - 01),
        date!(2024 - 06 - 01),
        date!(2100 - 01 - 01),
    ] {
        for family in TierFamily::ALL {
            let resolved = table.resolve(family, as_of);
            for category in TierCategory::ALL {
                let tier = resolved.get(category);
                assert_eq!(tier.category, category);
                assert_eq!(tier.family, family);
            }
        }
    }
}

#[test]
fn test_reward_family_is_priced_separately() {
    let table = TierTable::from_json(TIERS).unwrap();
    let prices = table.current_prices(date!(2024 - 07 - 01));

    assert_eq!(
        prices.price(TierCategory::Basic, TierFamily::Plain),
        Money::new(150)
    );
    assert_eq!(
        prices.price(TierCategory::Basic, TierFamily::WithReward),
        Money::new(350)
    );
    assert_eq!(
        prices.price(TierCategory::School, TierFamily::WithReward),
        Money::new(200)
    );
    assert_eq!(
        prices.price(TierCategory::School, TierFamily::Plain),
        Money::ZERO
    );
}

#[test]
fn test_resolution_at_campaign_local_date() {
    let table = TierTable::from_json(TIERS).unwrap();
    // 23:30 in Prague on the night before the price change.
    let now = datetime!(2024-05-31 21:30 UTC);
    let as_of = campaign_date(now, CampaignTimezone::CentralEuropean);
    assert_eq!(
        table.resolve(TierFamily::Plain, as_of).price(TierCategory::Basic),
        Money::new(100)
    );

    // 00:30 in Prague, already the new tier.
    let now = datetime!(2024-05-31 22:30 UTC);
    let as_of = campaign_date(now, CampaignTimezone::CentralEuropean);
    assert_eq!(
        table.resolve(TierFamily::Plain, as_of).price(TierCategory::Basic),
        Money::new(150)
    );
}

#[test]
fn test_malformed_json() {
    assert!(TierTable::from_json("{\"results\": []}").is_err());
    assert!(TierTable::from_json("[]").unwrap().is_empty());
}

#[test]
fn test_float_prices_and_broken_entries_keep_the_table() {
    let table = TierTable::from_json(
        r#"[
            {"category": "basic", "price": 100, "takes_effect_on": "2024-01-01"},
            {"category": "company", "price": 990.0, "takes_effect_on": "2024-01-01"},
            {"category": "school", "price": null, "takes_effect_on": "2024-01-01"},
            {"price": 200, "takes_effect_on": "2024-01-01"}
        ]"#,
    )
    .unwrap();
    let resolved = table.resolve(TierFamily::Plain, date!(2024 - 03 - 01));
    assert_eq!(resolved.price(TierCategory::Basic), Money::new(100));
    assert_eq!(resolved.price(TierCategory::Company), Money::new(990));
    assert!(resolved.get(TierCategory::School).is_placeholder());
}

