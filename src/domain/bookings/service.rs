//! Bookings service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    domain::bookings::{
        accrual,
        errors::BookingsServiceError,
        models::{Booking, BookingStatus, BookingUuid, NewBooking},
    },
    notify::{Notifier, RewardsEvent},
    store::{BookingsStore, CatalogStore, PartnersStore, Scope},
};

/// Bookings service backed by the storage boundary.
#[derive(Clone)]
pub struct RewardsBookingsService {
    catalog: Arc<dyn CatalogStore>,
    partners: Arc<dyn PartnersStore>,
    bookings: Arc<dyn BookingsStore>,
    notifier: Arc<dyn Notifier>,
}

impl RewardsBookingsService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        partners: Arc<dyn PartnersStore>,
        bookings: Arc<dyn BookingsStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            partners,
            bookings,
            notifier,
        }
    }
}

impl std::fmt::Debug for RewardsBookingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardsBookingsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl BookingsService for RewardsBookingsService {
    #[tracing::instrument(
        name = "bookings.service.create_booking",
        skip(self, booking),
        fields(
            partner_uuid = %booking.partner_uuid,
            product_uuid = %booking.product_uuid,
            booking_uuid = tracing::field::Empty,
            points_earned = tracing::field::Empty
        ),
        err
    )]
    async fn create_booking(
        &self,
        booking: NewBooking,
    ) -> Result<Booking, BookingsServiceError> {
        if booking.quantity < 1 {
            return Err(BookingsServiceError::InvalidQuantity);
        }

        let partner = self
            .partners
            .get_partner(booking.partner_uuid)
            .await?
            .ok_or(BookingsServiceError::UnknownPartner)?;

        let product = self
            .catalog
            .get_product(booking.product_uuid)
            .await?
            .filter(|product| product.active)
            .ok_or(BookingsServiceError::InvalidProduct)?;

        // The reward spec is evaluated now and frozen; later catalog edits
        // never touch this record.
        let points_earned = accrual::points_for(&product.reward, booking.quantity);

        let record = Booking {
            uuid: BookingUuid::new(),
            partner_uuid: booking.partner_uuid,
            product_uuid: booking.product_uuid,
            product_name: product.name,
            partner_name: partner.full_name,
            quantity: booking.quantity,
            points_earned,
            proof_ref: booking.proof_ref,
            status: BookingStatus::Waiting,
            created_at: Timestamp::now(),
        };

        let span = Span::current();
        span.record("booking_uuid", tracing::field::display(record.uuid));
        span.record("points_earned", tracing::field::display(points_earned));

        self.bookings.insert_booking(record.clone()).await?;

        self.notifier
            .publish(RewardsEvent::BookingCreated {
                booking: record.uuid,
                status: record.status,
            })
            .await;

        info!(booking_uuid = %record.uuid, points_earned, "created booking");

        Ok(record)
    }

    #[tracing::instrument(
        name = "bookings.service.transition_booking",
        skip(self),
        fields(booking_uuid = %booking, target = %target),
        err
    )]
    async fn transition_booking(
        &self,
        booking: BookingUuid,
        target: BookingStatus,
        as_admin: bool,
    ) -> Result<Booking, BookingsServiceError> {
        if !as_admin {
            return Err(BookingsServiceError::Forbidden);
        }

        let current = self
            .bookings
            .get_booking(booking)
            .await?
            .ok_or(BookingsServiceError::NotFound)?;

        if !current.status.can_transition_to(target) {
            return Err(BookingsServiceError::InvalidTransition {
                from: current.status,
                to: target,
            });
        }

        // Conditional write: a racing admin action changes the status
        // between our read and this update, and the store reports it.
        let updated = self
            .bookings
            .update_booking_status(booking, current.status, target)
            .await?
            .ok_or(BookingsServiceError::InvalidTransition {
                from: current.status,
                to: target,
            })?;

        self.notifier
            .publish(RewardsEvent::BookingStatusChanged {
                booking: updated.uuid,
                status: updated.status,
            })
            .await;

        info!(booking_uuid = %updated.uuid, status = %updated.status, "booking transitioned");

        Ok(updated)
    }

    async fn list_bookings(&self, scope: Scope) -> Result<Vec<Booking>, BookingsServiceError> {
        Ok(self.bookings.list_bookings(scope).await?)
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Creates a booking in the `waiting` state with its point value frozen.
    async fn create_booking(&self, booking: NewBooking)
    -> Result<Booking, BookingsServiceError>;

    /// Applies an admin review decision; bookings transition exactly once.
    async fn transition_booking(
        &self,
        booking: BookingUuid,
        target: BookingStatus,
        as_admin: bool,
    ) -> Result<Booking, BookingsServiceError>;

    /// Retrieves bookings, newest first.
    async fn list_bookings(&self, scope: Scope) -> Result<Vec<Booking>, BookingsServiceError>;
}
