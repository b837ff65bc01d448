use chrono::{Duration, Utc};
use lootradar::application::view::build_view;
use lootradar::domain::entities::claim_record::ClaimRecord;
use lootradar::domain::entities::offer::{Offer, RawOffer};
use lootradar::domain::values::end_time::EndTime;
use lootradar::domain::values::progression::{PlayerStats, StreakStatus};
use lootradar::domain::values::rarity::Rarity;
use std::collections::HashSet;

mod common;
use common::raw_offer;

fn offer(raw: RawOffer) -> Offer {
    Offer::from_raw(raw).unwrap()
}

fn stats() -> PlayerStats {
    PlayerStats {
        balance: 0,
        level: 1,
        streak: StreakStatus {
            active: false,
            age_text: "Never".into(),
            message: "Start your streak!".into(),
        },
    }
}

fn view(offers: Vec<Offer>) -> lootradar::application::view::ReadView {
    build_view(
        offers,
        &HashSet::new(),
        &[],
        &stats(),
        Some(Utc::now()),
        Utc::now(),
    )
}

fn rail_titles(view: &lootradar::application::view::ReadView, id: &str) -> Vec<String> {
    view.rails
        .iter()
        .find(|r| r.id == id)
        .unwrap()
        .cards
        .iter()
        .map(|c| c.title.clone())
        .collect()
}

#[test]
fn test_hero_orders_free_by_urgency_before_paid() {
    let mut free_2h = raw_offer("Soon Gone", "Steam", "1");
    free_2h.end_time = Some(EndTime::Text("Ends in 2h".into()));
    let mut free_20h = raw_offer("Later Gone", "Steam", "2");
    free_20h.end_time = Some(EndTime::Text("Ends in 20h".into()));
    let mut paid = raw_offer("Big Discount", "Steam", "3");
    paid.discount_price = 9.99;
    paid.original_price = 59.99;
    paid.end_time = Some(EndTime::Text("Ends in 10h".into()));

    let v = view(vec![offer(paid), offer(free_20h), offer(free_2h)]);
    assert_eq!(
        rail_titles(&v, "hero_miss"),
        vec!["Soon Gone", "Later Gone", "Big Discount"]
    );
}

#[test]
fn test_hero_admits_free_now_and_urgent_only() {
    let free_forever = raw_offer("Free Forever", "Steam", "1");
    let mut paid_distant = raw_offer("Paid Distant", "Steam", "2");
    paid_distant.discount_price = 4.99;
    paid_distant.end_time = Some(EndTime::Text("Ends in 3d".into()));
    let mut paid_unknown_end = raw_offer("Paid Unknown", "Steam", "3");
    paid_unknown_end.discount_price = 4.99;
    paid_unknown_end.end_time = Some(EndTime::Text("sometime".into()));

    let v = view(vec![
        offer(free_forever),
        offer(paid_distant),
        offer(paid_unknown_end),
    ]);
    // Unknown or distant end times are never urgent.
    assert_eq!(rail_titles(&v, "hero_miss"), vec!["Free Forever"]);
}

#[test]
fn test_tie_break_by_value_then_title() {
    let mut cheap = raw_offer("Alpha", "Steam", "1");
    cheap.original_price = 4.99;
    let mut pricey = raw_offer("Zulu", "Steam", "2");
    pricey.original_price = 49.99;
    let mut same_a = raw_offer("Banana", "Steam", "3");
    same_a.original_price = 4.99;

    let v = view(vec![offer(cheap), offer(same_a), offer(pricey)]);
    assert_eq!(
        rail_titles(&v, "steam"),
        vec!["Zulu", "Alpha", "Banana"]
    );
}

#[test]
fn test_platform_bucketing_and_other_sources() {
    let v = view(vec![
        offer(raw_offer("On Steam", "Steam Store", "1")),
        offer(raw_offer("On Epic", "Epic Games", "2")),
        offer(raw_offer("On Gog", "GOG", "3")),
        offer(raw_offer("Indie Find", "Itch.io", "4")),
    ]);
    assert_eq!(rail_titles(&v, "steam"), vec!["On Steam"]);
    assert_eq!(rail_titles(&v, "epic"), vec!["On Epic"]);
    assert_eq!(rail_titles(&v, "gog"), vec!["On Gog"]);
    // Unknown platforms skip platform rails but stay hero-eligible.
    assert!(rail_titles(&v, "hero_miss").contains(&"Indie Find".to_string()));
}

#[test]
fn test_mystery_routed_only_to_mystery_rail() {
    let v = view(vec![offer(raw_offer("Mystery Vault Game", "Steam", "1"))]);
    assert_eq!(rail_titles(&v, "mystery"), vec!["Mystery Vault Game"]);
    assert!(rail_titles(&v, "hero_miss").is_empty());
    assert!(rail_titles(&v, "steam").is_empty());
    let mystery_rail = v.rails.iter().find(|r| r.id == "mystery").unwrap();
    assert_eq!(mystery_rail.cards[0].offer_type, "Mystery");
}

#[test]
fn test_opened_offers_leave_active_rails() {
    let o = offer(raw_offer("Claimed Already", "Steam", "1"));
    let mut opened = HashSet::new();
    opened.insert(o.canonical_id.clone());

    let v = build_view(vec![o], &opened, &[], &stats(), None, Utc::now());
    assert!(rail_titles(&v, "steam").is_empty());
    assert!(rail_titles(&v, "hero_miss").is_empty());
}

#[test]
fn test_history_rail_is_reverse_chronological() {
    let older = ClaimRecord {
        user_id: "u1".into(),
        canonical_id: "claim:steam:1".into(),
        title: "First Claim".into(),
        source: "Steam".into(),
        store_url: "https://x.example/1".into(),
        cover_image_url: String::new(),
        rarity: Rarity::Common,
        savings: 9.99,
        claimed_at: Utc::now() - Duration::hours(2),
    };
    let mut newer = older.clone();
    newer.canonical_id = "claim:steam:2".into();
    newer.title = "Second Claim".into();
    newer.savings = 20.0;
    newer.claimed_at = Utc::now();

    let v = build_view(
        vec![],
        &HashSet::new(),
        &[older, newer],
        &stats(),
        None,
        Utc::now(),
    );
    assert_eq!(
        rail_titles(&v, "history"),
        vec!["Second Claim", "First Claim"]
    );
    assert!(v
        .rails
        .iter()
        .find(|r| r.id == "history")
        .unwrap()
        .cards
        .iter()
        .all(|c| c.opened));
    // Collection value comes from history, not the (empty) cache.
    assert_eq!(v.hero.collection_value, 29.99);
}

#[test]
fn test_rail_order_and_empty_messages() {
    let v = view(vec![]);
    let ids: Vec<&str> = v.rails.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["hero_miss", "steam", "epic", "gog", "mystery", "history"]
    );
    for rail in &v.rails {
        assert!(rail.cards.is_empty());
        assert!(!rail.empty_message.is_empty());
    }

    let titles: Vec<&str> = v.rails.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles[1..4], ["On Steam", "Epic Games", "GOG"]);
}

#[test]
fn test_card_shape_defaults() {
    let mut raw = raw_offer("Hue Check", "Steam", "1");
    raw.end_time = Some(EndTime::Text("Ends in 2d".into()));
    let v = view(vec![offer(raw)]);
    let card = &v.rails.iter().find(|r| r.id == "steam").unwrap().cards[0];
    assert!(card.fallback_hue < 360);
    assert_eq!(card.id, "claim:steam:1");
    assert_eq!(card.end_time_rel.as_deref(), Some("Ends in 2d"));
    assert_eq!(card.rating, "RARE");
    assert!(card.is_free_now);
    assert!(!card.opened);
}

#[test]
fn test_scout_status_reflects_scan_activity() {
    let scanned = view(vec![]);
    assert_eq!(scanned.scout.status, "watching");
    assert_eq!(scanned.scout.last_discovery_age, "Just now");

    let never = build_view(vec![], &HashSet::new(), &[], &stats(), None, Utc::now());
    assert_eq!(never.scout.status, "idle");
    assert_eq!(never.scout.last_discovery_age, "Never");
}
