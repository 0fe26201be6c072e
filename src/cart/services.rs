use rust_decimal::Decimal;

use crate::error::ApiError;

/// Validate the quantity for a product not yet in the cart.
pub(crate) fn check_new_item_quantity(requested: i32, stock: i32) -> Result<(), ApiError> {
    if requested <= 0 {
        return Err(ApiError::bad_request("Quantity cannot be less than 0"));
    }
    if requested > stock {
        return Err(ApiError::bad_request("Quantity is greater than stock"));
    }
    Ok(())
}

/// Delta semantics: the requested quantity is added to the existing one.
/// Returns the merged quantity, or a message naming the computed total.
/// The sum is taken in i64 so an extreme delta reaches the bound checks
/// instead of overflowing.
pub(crate) fn merge_quantity(existing: i32, requested: i32, stock: i32) -> Result<i32, ApiError> {
    let total = i64::from(existing) + i64::from(requested);
    if total <= 0 {
        return Err(ApiError::bad_request(format!(
            "Total quantity cannot be less than 0. {total} total requested."
        )));
    }
    if total > i64::from(stock) {
        return Err(ApiError::bad_request(format!(
            "Total quantity is greater than stock. {total} total requested."
        )));
    }
    Ok(total as i32)
}

/// Item subtotal at time of write; not re-synced if the price later changes.
pub(crate) fn subtotal(price: Decimal, quantity: i32) -> Decimal {
    price * Decimal::from(quantity)
}

/// Writes the PUT handler may perform. Produced only after the quantity
/// checks pass, so a rejected request can never reach the store.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PutPlan {
    Insert {
        quantity: i32,
        subtotal: Decimal,
    },
    Merge {
        new_quantity: i32,
        new_subtotal: Decimal,
        delta_quantity: i32,
        delta_price: Decimal,
    },
}

pub(crate) fn plan_put(
    existing_quantity: Option<i32>,
    requested: i32,
    stock: i32,
    price: Decimal,
) -> Result<PutPlan, ApiError> {
    match existing_quantity {
        None => {
            check_new_item_quantity(requested, stock)?;
            Ok(PutPlan::Insert {
                quantity: requested,
                subtotal: subtotal(price, requested),
            })
        }
        Some(existing) => {
            let new_quantity = merge_quantity(existing, requested, stock)?;
            Ok(PutPlan::Merge {
                new_quantity,
                new_subtotal: subtotal(price, new_quantity),
                // Cart totals move by the requested delta only
                delta_quantity: requested,
                delta_price: subtotal(price, requested),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: ApiError) -> String {
        err.to_string()
    }

    #[test]
    fn new_item_accepts_quantity_within_stock() {
        assert!(check_new_item_quantity(3, 3).is_ok());
        assert!(check_new_item_quantity(1, 10).is_ok());
    }

    #[test]
    fn new_item_rejects_non_positive_quantity() {
        let err = check_new_item_quantity(0, 10).unwrap_err();
        assert_eq!(message(err), "Quantity cannot be less than 0");
        assert!(check_new_item_quantity(-2, 10).is_err());
    }

    #[test]
    fn new_item_rejects_quantity_over_stock() {
        let err = check_new_item_quantity(4, 3).unwrap_err();
        assert_eq!(message(err), "Quantity is greater than stock");
    }

    #[test]
    fn merge_adds_requested_delta() {
        assert_eq!(merge_quantity(3, 2, 5).unwrap(), 5);
    }

    #[test]
    fn merge_accepts_negative_delta_down_to_one() {
        assert_eq!(merge_quantity(3, -2, 5).unwrap(), 1);
    }

    #[test]
    fn merge_rejects_total_at_or_below_zero_naming_the_total() {
        let err = merge_quantity(2, -2, 5).unwrap_err();
        assert_eq!(
            message(err),
            "Total quantity cannot be less than 0. 0 total requested."
        );
        let err = merge_quantity(1, -4, 5).unwrap_err();
        assert_eq!(
            message(err),
            "Total quantity cannot be less than 0. -3 total requested."
        );
    }

    #[test]
    fn merge_rejects_total_over_stock_naming_the_total() {
        let err = merge_quantity(3, 3, 5).unwrap_err();
        assert_eq!(
            message(err),
            "Total quantity is greater than stock. 6 total requested."
        );
    }

    #[test]
    fn merge_survives_extreme_positive_delta() {
        let err = merge_quantity(1, i32::MAX, 10).unwrap_err();
        assert_eq!(
            message(err),
            "Total quantity is greater than stock. 2147483648 total requested."
        );
    }

    #[test]
    fn merge_survives_extreme_negative_delta() {
        let err = merge_quantity(1, i32::MIN, 10).unwrap_err();
        assert_eq!(
            message(err),
            "Total quantity cannot be less than 0. -2147483647 total requested."
        );
    }

    #[test]
    fn plan_inserts_new_item_with_subtotal() {
        let price: Decimal = "10.00".parse().unwrap();
        let plan = plan_put(None, 3, 5, price).unwrap();
        assert_eq!(
            plan,
            PutPlan::Insert {
                quantity: 3,
                subtotal: "30.00".parse().unwrap(),
            }
        );
    }

    #[test]
    fn plan_merges_existing_item_moving_totals_by_the_delta() {
        let price: Decimal = "10.00".parse().unwrap();
        let plan = plan_put(Some(3), 2, 5, price).unwrap();
        assert_eq!(
            plan,
            PutPlan::Merge {
                new_quantity: 5,
                new_subtotal: "50.00".parse().unwrap(),
                delta_quantity: 2,
                delta_price: "20.00".parse().unwrap(),
            }
        );
    }

    #[test]
    fn rejected_put_produces_no_write_plan() {
        let price: Decimal = "10.00".parse().unwrap();
        // over stock, for both the new-item and the merge branch
        assert!(plan_put(None, 9, 5, price).is_err());
        assert!(plan_put(Some(3), 3, 5, price).is_err());
        // and for the overflow case
        assert!(plan_put(Some(1), i32::MAX, 5, price).is_err());
    }

    #[test]
    fn subtotal_is_price_times_quantity() {
        let price: Decimal = "10.00".parse().unwrap();
        assert_eq!(subtotal(price, 3), "30.00".parse::<Decimal>().unwrap());
        assert_eq!(subtotal(price, 5), "50.00".parse::<Decimal>().unwrap());
    }
}
