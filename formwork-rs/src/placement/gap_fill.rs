//! Combinatorial search for the end-piece combination that best fills the remaining gap of a row.

use log::trace;

use crate::entities::Part;
use crate::util::FPA;

/// Best combination found by [`find_best_combination`].
///
/// `first` is the outer piece (from the first catalog), `second` the optional inner piece
/// (from the second catalog). Both empty when nothing fits.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GapFill<'a> {
    pub first: Option<&'a Part>,
    pub second: Option<&'a Part>,
}

impl<'a> GapFill<'a> {
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }

    /// Total length the combination covers along the row
    pub fn length(&self, spacing: f64) -> f64 {
        match (self.first, self.second) {
            (Some(a), Some(b)) => a.width + spacing + b.width,
            (Some(a), None) => a.width,
            (None, Some(b)) => b.width,
            (None, None) => 0.0,
        }
    }
}

/// Finds the single part of `a`, or pair of a part of `a` with a part of `b` (separated by
/// `spacing`), whose total width leaves the smallest non-negative remainder in
/// `available - clearance`.
///
/// Singles are evaluated before pairs, both in catalog order; a later candidate only replaces the
/// best one on a strict improvement.
pub fn find_best_combination<'a>(
    a: &[&'a Part],
    b: &[&'a Part],
    available: f64,
    spacing: f64,
    clearance: f64,
) -> GapFill<'a> {
    let fittable = available - clearance;

    let singles = a.iter().map(|&pa| {
        (GapFill { first: Some(pa), second: None }, pa.width)
    });
    let pairs = a.iter().flat_map(|&pa| {
        b.iter().map(move |&pb| {
            (GapFill { first: Some(pa), second: Some(pb) }, pa.width + spacing + pb.width)
        })
    });

    let mut best: Option<(GapFill<'a>, f64)> = None;
    for (candidate, length) in singles.chain(pairs) {
        let delta = fittable - length;
        //exact fits may come out marginally negative
        if FPA(delta) < FPA(0.0) {
            continue;
        }
        match best {
            //remainders equal up to float noise are no improvement
            Some((_, best_delta)) if FPA(delta.abs()) >= FPA(best_delta.abs()) => {}
            _ => best = Some((candidate, delta)),
        }
    }

    trace!(
        "[PLACE] gap {:.3} (fittable {:.3}): best remainder {:?}",
        available,
        fittable,
        best.map(|(_, d)| d)
    );
    best.map(|(fill, _)| fill).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::UsageType;

    #[test]
    fn exact_pair_beats_single() {
        let end = Part::new(0, "end 30", 30.0, 10.0, UsageType::EndSpacer, 1);
        let lp = Part::new(1, "lp 50", 50.0, 10.0, UsageType::Spacer, 1);
        let fill = find_best_combination(&[&end], &[&lp], 85.0, 5.0, 0.0);
        assert_eq!(fill.first.map(|p| p.id), Some(0));
        assert_eq!(fill.second.map(|p| p.id), Some(1));
        assert_eq!(fill.length(5.0), 85.0);
    }

    #[test]
    fn nothing_fits() {
        let end = Part::new(0, "end 30", 30.0, 10.0, UsageType::EndSpacer, 1);
        let fill = find_best_combination(&[&end], &[], 40.0, 0.0, 15.0);
        assert!(fill.is_empty());
    }
}
