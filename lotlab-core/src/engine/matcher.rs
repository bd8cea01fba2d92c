//! FIFO lot matcher — turns one asset's order tape into open/closed lots.
//!
//! Buys seed a queue of open lots; sells drain it front-first (oldest lot
//! first). A sell crossing a lot boundary splits fees proportionally on a
//! per-piece basis, so fees are redistributed but never created or
//! destroyed.

use std::collections::VecDeque;

use thiserror::Error;

use super::normalize::sort_chronologically;
use crate::domain::{ClosedPosition, OpenPosition, Order, Positions};

/// Matching failure: more pieces sold than ever bought.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("oversold: sell volume exceeds bought volume by {excess} pieces")]
    Oversold { excess: f64 },
}

/// Residue below this many pieces is rounding noise, not an oversell.
/// Sequential subtraction can leave ~1e-17 of a sell unsatisfied even when
/// the tape's signed sum is exactly zero.
const PIECE_DUST: f64 = 1e-9;

/// Matches all orders for one asset into open and closed positions.
///
/// Validates only the final balance: if the signed piece sum over the whole
/// tape is negative the match fails with no partial result. All buy lots
/// are seeded before any sell is folded, so a sell may consume a lot bought
/// at a later timestamp — point-in-time validation is the history
/// generator's job, not this function's.
pub fn match_orders(orders: &[Order]) -> Result<Positions, MatchError> {
    let balance: f64 = orders.iter().map(|o| o.pieces).sum();
    if balance < 0.0 {
        return Err(MatchError::Oversold { excess: -balance });
    }

    let sorted = sort_chronologically(orders);

    let mut open: VecDeque<OpenPosition> = sorted
        .iter()
        .filter(|o| o.is_buy())
        .map(|o| OpenPosition {
            pieces: o.pieces,
            buy_price: o.share_price,
            buy_date: o.timestamp,
            order_fee: o.order_fee,
        })
        .collect();

    let mut closed: Vec<ClosedPosition> = Vec::new();
    for sell in sorted.iter().filter(|o| o.is_sell()) {
        consume(&mut open, &mut closed, sell)?;
    }

    Ok(Positions {
        open: open.into_iter().collect(),
        closed,
    })
}

/// Drains the lot queue for one sell, appending closed lots.
///
/// Three cases per front lot, compared on remaining sell pieces vs lot
/// pieces:
/// - equal: the lot closes whole and absorbs the whole remaining sell fee
/// - sell smaller: the lot splits; the closed fragment takes a piece-
///   proportional share of the lot fee plus the remaining sell fee
/// - sell larger: the lot closes whole, absorbing the share of the sell fee
///   proportional to the fraction of the sell it satisfies; the loop
///   carries the reduced remainder to the next lot
fn consume(
    open: &mut VecDeque<OpenPosition>,
    closed: &mut Vec<ClosedPosition>,
    sell: &Order,
) -> Result<(), MatchError> {
    let mut pieces_to_sell = -sell.pieces;
    let mut sell_fee = sell.order_fee;

    while pieces_to_sell > 0.0 {
        let Some(lot) = open.pop_front() else {
            // only float residue can land here when the final balance was
            // non-negative; a real oversell was caught by the balance check
            if pieces_to_sell < PIECE_DUST {
                return Ok(());
            }
            return Err(MatchError::Oversold {
                excess: pieces_to_sell,
            });
        };

        if pieces_to_sell < lot.pieces {
            let sold_share = pieces_to_sell / lot.pieces;
            closed.push(ClosedPosition {
                pieces: pieces_to_sell,
                buy_price: lot.buy_price,
                buy_date: lot.buy_date,
                order_fee: sold_share * lot.order_fee + sell_fee,
                sell_price: sell.share_price,
                sell_date: sell.timestamp,
            });
            open.push_front(OpenPosition {
                pieces: lot.pieces - pieces_to_sell,
                buy_price: lot.buy_price,
                buy_date: lot.buy_date,
                order_fee: (1.0 - sold_share) * lot.order_fee,
            });
            return Ok(());
        }

        if pieces_to_sell == lot.pieces {
            closed.push(ClosedPosition {
                pieces: lot.pieces,
                buy_price: lot.buy_price,
                buy_date: lot.buy_date,
                order_fee: lot.order_fee + sell_fee,
                sell_price: sell.share_price,
                sell_date: sell.timestamp,
            });
            return Ok(());
        }

        // lot exhausted: it absorbs its proportional share of the sell fee,
        // the remainder of the sell carries on against the next lot
        let fee_share = lot.pieces / pieces_to_sell;
        closed.push(ClosedPosition {
            pieces: lot.pieces,
            buy_price: lot.buy_price,
            buy_date: lot.buy_date,
            order_fee: lot.order_fee + fee_share * sell_fee,
            sell_price: sell.share_price,
            sell_date: sell.timestamp,
        });
        sell_fee *= 1.0 - fee_share;
        pieces_to_sell -= lot.pieces;
    }

    Ok(())
}
