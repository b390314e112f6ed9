//! Test Helpers

use crate::{
    domain::{
        bookings::{
            BookingsService, BookingsServiceError,
            models::{Booking, BookingStatus, NewBooking},
        },
        catalog::models::{ProductUuid, RewardSpec},
    },
    test::TestContext,
};

pub(crate) async fn create_booking(
    ctx: &TestContext,
    product: ProductUuid,
    quantity: u32,
) -> Result<Booking, BookingsServiceError> {
    ctx.bookings
        .create_booking(NewBooking {
            partner_uuid: ctx.partner_uuid,
            product_uuid: product,
            quantity,
            proof_ref: None,
        })
        .await
}

/// Give the context's partner an approved booking worth `points`.
pub(crate) async fn earn_points(
    ctx: &TestContext,
    points: u64,
) -> Result<Booking, BookingsServiceError> {
    let product = ctx.seed_product(RewardSpec::PerUnit { points }).await;

    let booking = create_booking(ctx, product, 1).await?;

    ctx.bookings
        .transition_booking(booking.uuid, BookingStatus::Approved, true)
        .await
}
