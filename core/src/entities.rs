//! Entity operations: each model issues the HTTP calls that create, read,
//! update or delete it.
//!
//! Every operation has a plain form that expects the endpoint's usual status
//! and an `_expecting` form taking the status explicitly. A mismatch comes
//! back as `ApiError::UnexpectedStatus`; nothing is retried.

use crate::error::ApiError;
use crate::session::Session;
use crate::types::{Employee, EmployeeField, EmployeeObject, Resource, User, UserPage};

pub const CREATED: u16 = 201;
pub const OK: u16 = 200;
pub const NO_CONTENT: u16 = 204;

/// Page `User::fetch_users` reads when callers have no preference.
pub const DEFAULT_USER_PAGE: u32 = 2;

impl Employee {
    pub fn create(session: &Session, payload: &EmployeeObject) -> Result<Employee, ApiError> {
        Self::create_expecting(session, payload, CREATED)
    }

    pub fn create_expecting(
        session: &Session,
        payload: &EmployeeObject,
        expected: u16,
    ) -> Result<Employee, ApiError> {
        let req = session.client().build_create_employee(payload)?;
        let response = session.send(req)?;
        session.client().parse_create_employee(response, expected)
    }

    pub fn update(&mut self, session: &Session) -> Result<(), ApiError> {
        self.update_expecting(session, OK)
    }

    /// Replace the remote record with the full local field set, then merge the
    /// response back.
    pub fn update_expecting(&mut self, session: &Session, expected: u16) -> Result<(), ApiError> {
        let id = self.id().ok_or(ApiError::MissingId("update"))?;
        let req = session.client().build_update_employee(id, self)?;
        let response = session.send(req)?;
        let changes = session.client().parse_employee_changes(response, expected)?;
        self.merge(changes)
    }

    pub fn patch(&mut self, session: &Session, fields: &[EmployeeField]) -> Result<(), ApiError> {
        self.patch_expecting(session, fields, OK)
    }

    /// Send only `fields`, then merge the response back.
    pub fn patch_expecting(
        &mut self,
        session: &Session,
        fields: &[EmployeeField],
        expected: u16,
    ) -> Result<(), ApiError> {
        let id = self.id().ok_or(ApiError::MissingId("patch"))?;
        let req = session.client().build_patch_employee(id, fields)?;
        let response = session.send(req)?;
        let changes = session.client().parse_employee_changes(response, expected)?;
        self.merge(changes)
    }

    pub fn delete(&self, session: &Session) -> Result<u16, ApiError> {
        self.delete_expecting(session, NO_CONTENT)
    }

    /// Returns the observed status code.
    pub fn delete_expecting(&self, session: &Session, expected: u16) -> Result<u16, ApiError> {
        let id = self.id().ok_or(ApiError::MissingId("delete"))?;
        let req = session.client().build_delete_employee(id);
        let response = session.send(req)?;
        session.client().parse_delete_employee(response, expected)
    }
}

impl User {
    pub fn fetch_users(session: &Session, page: u32) -> Result<Vec<User>, ApiError> {
        Self::fetch_users_expecting(session, page, OK)
    }

    pub fn fetch_users_expecting(session: &Session, page: u32, expected: u16) -> Result<Vec<User>, ApiError> {
        Ok(Self::fetch_page_expecting(session, page, expected)?.data)
    }

    pub fn fetch_page(session: &Session, page: u32) -> Result<UserPage, ApiError> {
        Self::fetch_page_expecting(session, page, OK)
    }

    pub fn fetch_page_expecting(session: &Session, page: u32, expected: u16) -> Result<UserPage, ApiError> {
        let req = session.client().build_list_users(page);
        let response = session.send(req)?;
        session.client().parse_list_users(response, expected)
    }
}

impl Resource {
    pub fn fetch(session: &Session, id: u64) -> Result<Resource, ApiError> {
        Self::fetch_expecting(session, id, OK)
    }

    pub fn fetch_expecting(session: &Session, id: u64, expected: u16) -> Result<Resource, ApiError> {
        let req = session.client().build_get_resource(id);
        let response = session.send(req)?;
        session.client().parse_get_resource(response, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        // Never contacted: every case here fails before a request is built.
        Session::without_logging("http://127.0.0.1:9")
    }

    #[test]
    fn update_without_id_fails_before_sending() {
        let mut employee = Employee::new("morpheus", "leader");
        let err = employee.update(&session()).unwrap_err();
        assert!(matches!(err, ApiError::MissingId("update")));
    }

    #[test]
    fn patch_without_id_fails_before_sending() {
        let mut employee = Employee::new("morpheus", "leader");
        let err = employee
            .patch(&session(), &[EmployeeField::Job("oracle".to_string())])
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingId("patch")));
        assert_eq!(employee.job(), "leader");
    }

    #[test]
    fn delete_without_id_fails_before_sending() {
        let employee = Employee::new("morpheus", "leader");
        let err = employee.delete(&session()).unwrap_err();
        assert!(matches!(err, ApiError::MissingId("delete")));
    }
}
