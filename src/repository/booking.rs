use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::booking::{Booking, NewBooking};
use crate::domain::service::SubService;
use crate::domain::types::{BookingId, BookingReference, SubServiceId};
use crate::models::booking::{Booking as DbBooking, NewBooking as DbNewBooking};
use crate::models::service::SubService as DbSubService;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BookingReader, BookingWriter, DieselRepository};

/// Upper bound on reference regeneration when an insert hits the unique
/// index. The 36^4 suffix space makes more than one retry very unlikely.
const MAX_REFERENCE_ATTEMPTS: usize = 5;

impl BookingReader for DieselRepository {
    fn get_booking_by_reference(&self, reference: &str) -> RepositoryResult<Option<Booking>> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let booking = bookings::table
            .filter(bookings::reference.eq(reference))
            .first::<DbBooking>(&mut conn)
            .optional()?;

        let booking = booking.map(TryInto::try_into).transpose()?;
        Ok(booking)
    }

    fn list_booking_sub_services(&self, id: BookingId) -> RepositoryResult<Vec<SubService>> {
        use crate::schema::{booking_sub_services, sub_services};

        let mut conn = self.conn()?;

        let items = sub_services::table
            .inner_join(booking_sub_services::table)
            .filter(booking_sub_services::booking_id.eq(id.get()))
            .select(sub_services::all_columns)
            .order(sub_services::display_order.asc())
            .load::<DbSubService>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<SubService>, _>>()?;

        Ok(items)
    }
}

impl BookingWriter for DieselRepository {
    fn create_booking(
        &self,
        booking: &NewBooking,
        sub_services: &[SubServiceId],
    ) -> RepositoryResult<Booking> {
        use crate::schema::{booking_sub_services, bookings};

        let mut conn = self.conn()?;
        let today = Utc::now().date_naive();

        for _ in 0..MAX_REFERENCE_ATTEMPTS {
            let reference = BookingReference::generate(today);
            let db_booking = DbNewBooking::from_domain(booking, &reference);

            let result = conn.transaction::<DbBooking, DieselError, _>(|conn| {
                let row = diesel::insert_into(bookings::table)
                    .values(&db_booking)
                    .get_result::<DbBooking>(conn)?;

                if !sub_services.is_empty() {
                    let links: Vec<_> = sub_services
                        .iter()
                        .map(|sub_service_id| {
                            (
                                booking_sub_services::booking_id.eq(row.id),
                                booking_sub_services::sub_service_id.eq(sub_service_id.get()),
                            )
                        })
                        .collect();
                    diesel::insert_into(booking_sub_services::table)
                        .values(&links)
                        .execute(conn)?;
                }

                Ok(row)
            });

            match result {
                Ok(row) => return Ok(row.try_into()?),
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(RepositoryError::ReferenceExhausted)
    }

    fn mark_booking_notified(
        &self,
        id: BookingId,
        number: &str,
        sent_at: NaiveDateTime,
    ) -> RepositoryResult<usize> {
        use crate::schema::bookings;

        let mut conn = self.conn()?;

        let affected = diesel::update(bookings::table.filter(bookings::id.eq(id.get())))
            .set((
                bookings::whatsapp_sent.eq(true),
                bookings::whatsapp_sent_at.eq(Some(sent_at)),
                bookings::whatsapp_number_used.eq(Some(number)),
                bookings::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
