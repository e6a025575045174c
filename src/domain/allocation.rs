use super::validation::{ensure_amount, Advisory, InvalidInput, SHARE_TARGET, SHARE_TOLERANCE};

/// Normalized order weights, one per basket, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeAllocation {
    pub weights: Vec<f64>,
    /// Sum of the raw shares before normalization.
    pub share_total: f64,
}

impl VolumeAllocation {
    pub fn is_off_target(&self) -> bool {
        (self.share_total - SHARE_TARGET).abs() > SHARE_TOLERANCE
    }

    pub fn advisory(&self) -> Option<Advisory> {
        self.is_off_target().then(|| Advisory::VolumeSharesOffTarget {
            total: self.share_total,
        })
    }
}

/// Turns raw volume shares into weights summing to 1.
///
/// Shares are treated as relative proportions, so `[60, 60]` and `[50, 50]`
/// allocate identically; the first one merely raises an advisory.
pub fn allocate_volume(shares: &[f64]) -> Result<VolumeAllocation, InvalidInput> {
    if shares.is_empty() {
        return Err(InvalidInput::EmptyBasketSet);
    }
    for share in shares {
        ensure_amount("volume_share", *share)?;
    }

    let share_total: f64 = shares.iter().sum();
    if !share_total.is_finite() {
        return Err(InvalidInput::InvalidAmount {
            field: "volume_share total".to_string(),
            value: share_total,
        });
    }
    if share_total <= 0.0 {
        return Err(InvalidInput::ZeroVolumeShares);
    }

    let weights = shares.iter().map(|share| share / share_total).collect();

    Ok(VolumeAllocation {
        weights,
        share_total,
    })
}
