use crate::domain::model::Participant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Final slice count per participant, in participant order.
    pub allocations: Vec<u32>,
    /// Purchased slices nobody took.
    pub leftover: u32,
    /// Required slices that could not be covered.
    pub shortfall: u32,
}

impl Distribution {
    /// Signed residual: leftover when positive, shortfall when negative.
    pub fn residual(&self) -> i64 {
        if self.shortfall > 0 {
            -i64::from(self.shortfall)
        } else {
            i64::from(self.leftover)
        }
    }

    pub fn assigned(&self) -> u32 {
        self.allocations.iter().sum()
    }
}

/// Splits `purchased` slices over `participants`.
///
/// Everyone starts at their requirement. A shortfall is taken back round-robin,
/// with the first participants in the list giving up the remainder. A surplus
/// is handed out one slice at a time to participants who accept extra; if
/// nobody does, it stays in the leftover pool.
pub fn distribute(purchased: u32, participants: &[Participant]) -> Distribution {
    let mut allocations: Vec<u32> = participants.iter().map(|p| p.required_slices).collect();
    let required: u64 = allocations.iter().map(|&slices| u64::from(slices)).sum();
    let pieces = i64::from(purchased) - required as i64;

    if participants.is_empty() {
        return Distribution {
            allocations,
            leftover: purchased,
            shortfall: 0,
        };
    }

    if pieces < 0 {
        let missing = pieces.unsigned_abs();
        take_back(&mut allocations, missing);
        debug!(missing, "shortfall taken back round-robin");
        return Distribution {
            allocations,
            leftover: 0,
            shortfall: u32::try_from(missing).unwrap_or(u32::MAX),
        };
    }

    let leftover = hand_out(&mut allocations, participants, pieces as u64);
    debug!(surplus = pieces, leftover, "surplus handed out");
    Distribution {
        allocations,
        leftover: u32::try_from(leftover).unwrap_or(u32::MAX),
        shortfall: 0,
    }
}

fn take_back(allocations: &mut [u32], missing: u64) {
    let count = allocations.len() as u64;
    let full_rounds = missing / count;
    let remainder = missing % count;
    let mut outstanding = missing;

    for (index, slot) in allocations.iter_mut().enumerate() {
        let mut to_subtract = full_rounds;
        if (index as u64) < remainder {
            to_subtract += 1;
        }
        let to_subtract = to_subtract.min(u64::from(*slot));
        *slot -= to_subtract as u32;
        outstanding -= to_subtract;
    }

    // Participants clamped at zero leave some shortfall behind; keep going round the list.
    while outstanding > 0 {
        let mut taken = false;
        for slot in allocations.iter_mut() {
            if outstanding == 0 {
                break;
            }
            if *slot > 0 {
                *slot -= 1;
                outstanding -= 1;
                taken = true;
            }
        }
        if !taken {
            break;
        }
    }
}

fn hand_out(allocations: &mut [u32], participants: &[Participant], mut pieces: u64) -> u64 {
    while pieces > 0 {
        let mut distributed = false;

        for (slot, participant) in allocations.iter_mut().zip(participants) {
            if pieces == 0 {
                break;
            }
            if participant.can_take_extra {
                *slot += 1;
                pieces -= 1;
                distributed = true;
            }
        }

        if !distributed {
            break;
        }
    }
    pieces
}
