use rtw_domain::{Money, PriceTier, TierCategory, TierFamily};
use time::Date;
use tracing::debug;

/// The tier in effect for every category of one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPriceSet {
    family: TierFamily,
    basic: PriceTier,
    company: PriceTier,
    school: PriceTier,
}

impl ResolvedPriceSet {
    pub fn family(&self) -> TierFamily {
        self.family
    }

    /// The tier in effect for `category`, or its zero-price placeholder.
    pub fn get(&self, category: TierCategory) -> &PriceTier {
        match category {
            TierCategory::Basic => &self.basic,
            TierCategory::Company => &self.company,
            TierCategory::School => &self.school,
        }
    }

    pub fn price(&self, category: TierCategory) -> Money {
        self.get(category).price
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceTier> {
        TierCategory::ALL.into_iter().map(|category| self.get(category))
    }
}

/// Both families resolved against the same date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPrices {
    pub plain: ResolvedPriceSet,
    pub with_reward: ResolvedPriceSet,
}

impl CurrentPrices {
    pub fn resolve(tiers: &[PriceTier], as_of: Date) -> Self {
        Self {
            plain: resolve_current_tiers(tiers, TierFamily::Plain, as_of),
            with_reward: resolve_current_tiers(tiers, TierFamily::WithReward, as_of),
        }
    }

    pub fn for_family(&self, family: TierFamily) -> &ResolvedPriceSet {
        match family {
            TierFamily::Plain => &self.plain,
            TierFamily::WithReward => &self.with_reward,
        }
    }

    pub fn price(&self, category: TierCategory, family: TierFamily) -> Money {
        self.for_family(family).price(category)
    }
}

/// Selects, for every category of `family`, the tier with the latest
/// `effective_from` that is not after `as_of`.
///
/// Categories without such a tier resolve to a zero-price placeholder, so
/// the result is total even for an empty table. Tiers sharing an
/// `effective_from` keep their input order and the later one wins.
pub fn resolve_current_tiers(
    tiers: &[PriceTier],
    family: TierFamily,
    as_of: Date,
) -> ResolvedPriceSet {
    let resolve = |category| match current_tier(tiers, category, family, as_of) {
        Some(tier) => {
            debug!(
                "Resolved {:?} tier for {} as of {}: {} (from {})",
                family, category, as_of, tier.price, tier.effective_from
            );
            tier.clone()
        }
        None => {
            debug!(
                "No {:?} tier in effect for {} as of {}",
                family, category, as_of
            );
            PriceTier::placeholder(category, family)
        }
    };

    ResolvedPriceSet {
        family,
        basic: resolve(TierCategory::Basic),
        company: resolve(TierCategory::Company),
        school: resolve(TierCategory::School),
    }
}

fn current_tier(
    tiers: &[PriceTier],
    category: TierCategory,
    family: TierFamily,
    as_of: Date,
) -> Option<&PriceTier> {
    let mut schedule: Vec<&PriceTier> = tiers
        .iter()
        .filter(|tier| tier.category == category && tier.family == family)
        .collect();
    // Input order is not trusted; the stable sort keeps duplicates in order.
    schedule.sort_by_key(|tier| tier.effective_from);

    // Tier i is current when it has started and tier i + 1 has not.
    let started = schedule.partition_point(|tier| tier.effective_from <= as_of);
    started
        .checked_sub(1)
        .and_then(|index| schedule.get(index))
        .copied()
}
