use proptest::prelude::*;
use tourdesk_catalog::{MarkupPolicy, PricingLineItem, ResourceType};
use tourdesk_core::GuestCount;
use tourdesk_offer::PackageAggregator;

fn resource_type() -> impl Strategy<Value = ResourceType> {
    prop::sample::select(vec![
        ResourceType::Hotel,
        ResourceType::Flight,
        ResourceType::Transport,
        ResourceType::Activity,
    ])
}

fn line_item() -> impl Strategy<Value = PricingLineItem> {
    (
        resource_type(),
        0i64..500_000,
        prop::option::of(0i64..500_000),
        prop::option::of(0i64..500_000),
        0u32..30,
    )
        .prop_map(|(resource_type, adult, child, infant, nights)| PricingLineItem {
            resource_type,
            name: format!("{resource_type:?}"),
            cost_per_adult_cents: adult,
            cost_per_child_cents: child,
            cost_per_infant_cents: infant,
            nights,
        })
}

fn guests() -> impl Strategy<Value = GuestCount> {
    (0u32..6, 0u32..6, 0u32..3).prop_map(|(a, c, i)| GuestCount::new(a, c, i))
}

fn markup() -> impl Strategy<Value = MarkupPolicy> {
    prop_oneof![
        (0.0f64..200.0).prop_map(MarkupPolicy::Percentage),
        (0i64..100_000).prop_map(MarkupPolicy::Fixed),
    ]
}

proptest! {
    #[test]
    fn permuting_items_keeps_totals(
        items in prop::collection::vec(line_item(), 0..8),
        guests in guests(),
        markup in markup(),
    ) {
        let aggregator = PackageAggregator::default();
        let forward = aggregator.aggregate_package_price(&items, &guests, &markup).unwrap();

        let mut reversed = items.clone();
        reversed.reverse();
        let backward = aggregator.aggregate_package_price(&reversed, &guests, &markup).unwrap();

        prop_assert_eq!(forward.cost_cents, backward.cost_cents);
        prop_assert_eq!(forward.selling_cents, backward.selling_cents);
        prop_assert_eq!(forward.breakdown, backward.breakdown);
    }

    #[test]
    fn adding_an_item_never_lowers_price(
        items in prop::collection::vec(line_item(), 0..8),
        extra in line_item(),
        guests in guests(),
        markup in markup(),
    ) {
        let aggregator = PackageAggregator::default();
        let before = aggregator.aggregate_package_price(&items, &guests, &markup).unwrap();

        let mut more = items.clone();
        more.push(extra);
        let after = aggregator.aggregate_package_price(&more, &guests, &markup).unwrap();

        prop_assert!(after.cost_cents >= before.cost_cents);
        prop_assert!(after.selling_cents >= before.selling_cents);
    }

    #[test]
    fn breakdown_sums_to_cost(
        items in prop::collection::vec(line_item(), 0..8),
        guests in guests(),
    ) {
        let aggregator = PackageAggregator::default();
        let price = aggregator
            .aggregate_package_price(&items, &guests, &MarkupPolicy::default())
            .unwrap();

        prop_assert_eq!(price.breakdown.total(), Ok(price.cost_cents));
        prop_assert_eq!(price.selling_cents, price.cost_cents);
    }
}

#[test]
fn test_rotated_order_scenario() {
    let aggregator = PackageAggregator::default();
    let items = vec![
        PricingLineItem::hotel("Hotel", 12_345, 3),
        PricingLineItem::flat(ResourceType::Flight, "Flight", 33_333),
        PricingLineItem::flat(ResourceType::Activity, "Dive", 7_777).with_child_cost(5_000),
    ];
    let guests = GuestCount::new(2, 2, 1);
    let markup = MarkupPolicy::Percentage(17.5);

    let baseline = aggregator.aggregate_package_price(&items, &guests, &markup).unwrap();
    for shift in 1..items.len() {
        let mut rotated = items.clone();
        rotated.rotate_left(shift);
        let price = aggregator.aggregate_package_price(&rotated, &guests, &markup).unwrap();
        assert_eq!(price, baseline);
    }
}
