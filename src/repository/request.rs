use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

use crate::domain::request::{
    NewRequestAttachment, NewServiceRequest, RequestAttachment, ServiceRequest,
};
use crate::domain::types::RequestId;
use crate::models::request::{
    NewRequestAttachment as DbNewRequestAttachment, NewServiceRequest as DbNewServiceRequest,
    RequestAttachment as DbRequestAttachment, ServiceRequest as DbServiceRequest,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, RequestReader, RequestWriter};

impl RequestReader for DieselRepository {
    fn get_request_by_id(&self, id: RequestId) -> RepositoryResult<Option<ServiceRequest>> {
        use crate::schema::service_requests;

        let mut conn = self.conn()?;

        let request = service_requests::table
            .filter(service_requests::id.eq(id.get()))
            .first::<DbServiceRequest>(&mut conn)
            .optional()?;

        let request = request.map(TryInto::try_into).transpose()?;
        Ok(request)
    }

    fn list_request_attachments(
        &self,
        id: RequestId,
    ) -> RepositoryResult<Vec<RequestAttachment>> {
        use crate::schema::request_attachments;

        let mut conn = self.conn()?;

        let items = request_attachments::table
            .filter(request_attachments::request_id.eq(id.get()))
            .order(request_attachments::uploaded_at.asc())
            .load::<DbRequestAttachment>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<RequestAttachment>, _>>()?;

        Ok(items)
    }
}

impl RequestWriter for DieselRepository {
    fn create_request(
        &self,
        request: &NewServiceRequest,
        attachments: &[NewRequestAttachment],
    ) -> RepositoryResult<ServiceRequest> {
        use crate::schema::{request_attachments, service_requests};

        let mut conn = self.conn()?;
        let db_request: DbNewServiceRequest = request.clone().into();

        // The request row and its attachments land together or not at all.
        let row = conn.transaction::<DbServiceRequest, DieselError, _>(|conn| {
            let row = diesel::insert_into(service_requests::table)
                .values(&db_request)
                .get_result::<DbServiceRequest>(conn)?;

            if !attachments.is_empty() {
                let db_attachments: Vec<DbNewRequestAttachment> = attachments
                    .iter()
                    .map(|attachment| DbNewRequestAttachment::from_domain(attachment, row.id))
                    .collect();
                diesel::insert_into(request_attachments::table)
                    .values(&db_attachments)
                    .execute(conn)?;
            }

            Ok(row)
        })?;

        Ok(row.try_into()?)
    }

    fn mark_request_notified(
        &self,
        id: RequestId,
        number: &str,
        sent_at: NaiveDateTime,
    ) -> RepositoryResult<usize> {
        use crate::schema::service_requests;

        let mut conn = self.conn()?;

        let affected =
            diesel::update(service_requests::table.filter(service_requests::id.eq(id.get())))
                .set((
                    service_requests::whatsapp_sent.eq(true),
                    service_requests::whatsapp_sent_at.eq(Some(sent_at)),
                    service_requests::whatsapp_number_used.eq(Some(number)),
                    service_requests::updated_at.eq(diesel::dsl::now),
                ))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
