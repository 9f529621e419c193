//! Directory lookups over the catalog collections.
//!
//! The catalogs are plain [`Repository`] instances; this module only adds the
//! filtered views the point of sale and the catalog screens need.

use crate::{
    core::{Record, Repository},
    errors::Result,
    models::{Article, Brand, Cafeteria, Campus, Employee, Shift, Supplier, User, UserType},
};
use sea_orm::ConnectionTrait;

/// Records that can be switched off without being deleted.
pub trait Activatable: Record {
    /// Whether the record is currently active
    fn is_active(&self) -> bool;
}

macro_rules! impl_activatable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Activatable for $ty {
                fn is_active(&self) -> bool {
                    self.active
                }
            }
        )*
    };
}

impl_activatable!(Article, Brand, Cafeteria, Campus, Employee, Supplier, User, UserType);

impl<C, T> Repository<'_, C, T>
where
    C: ConnectionTrait,
    T: Activatable,
{
    /// Active records only, in stored order.
    pub async fn active(&self) -> Result<Vec<T>> {
        self.search(|record| record.is_active()).await
    }
}

impl<C> Repository<'_, C, User>
where
    C: ConnectionTrait,
{
    /// Users of type `user_type_id`.
    pub async fn by_user_type(&self, user_type_id: &str) -> Result<Vec<User>> {
        self.search(|user| user.user_type_id == user_type_id).await
    }
}

impl<C> Repository<'_, C, Employee>
where
    C: ConnectionTrait,
{
    /// Employees working `shift`.
    pub async fn by_shift(&self, shift: Shift) -> Result<Vec<Employee>> {
        self.search(|employee| employee.shift == shift).await
    }
}

impl<C> Repository<'_, C, Cafeteria>
where
    C: ConnectionTrait,
{
    /// Cafeterias located on campus `campus_id`.
    pub async fn by_campus(&self, campus_id: &str) -> Result<Vec<Cafeteria>> {
        self.search(|cafeteria| cafeteria.campus_id == campus_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::{
        BrandUpdate, CafeteriaCreate, CampusCreate, EmployeeCreate, UserCreate, UserTypeCreate,
    };
    use crate::test_utils::{create_test_brand, create_test_employee, setup_test_db};
    use chrono::Utc;

    #[tokio::test]
    async fn test_active_filters_inactive_records() -> Result<()> {
        let db = setup_test_db().await?;
        let kept = create_test_brand(&db, "Coca-Cola").await?;
        let retired = create_test_brand(&db, "Nestle").await?;

        let brands: Repository<'_, _, Brand> = Repository::new(&db);
        brands
            .update(
                &retired.id,
                &BrandUpdate {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await?;

        assert_eq!(brands.active().await?, vec![kept]);
        assert_eq!(brands.count().await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_users_by_type_and_registration_stamp() -> Result<()> {
        let db = setup_test_db().await?;
        let types: Repository<'_, _, UserType> = Repository::new(&db);
        let student = types
            .create(UserTypeCreate {
                description: "Student".to_string(),
                active: true,
            })
            .await?;

        let before = Utc::now();
        let users: Repository<'_, _, User> = Repository::new(&db);
        let ana = users
            .create(UserCreate {
                name: "Ana".to_string(),
                national_id: "001-0000001-1".to_string(),
                user_type_id: student.id.clone(),
                credit_limit: 500.0,
                active: true,
            })
            .await?;
        assert!(ana.registered_at >= before);

        users
            .create(UserCreate {
                name: "Luis".to_string(),
                national_id: "001-0000002-2".to_string(),
                user_type_id: "other".to_string(),
                credit_limit: 0.0,
                active: true,
            })
            .await?;

        assert_eq!(users.by_user_type(&student.id).await?, vec![ana]);

        Ok(())
    }

    #[tokio::test]
    async fn test_employees_by_shift() -> Result<()> {
        let db = setup_test_db().await?;
        let morning = create_test_employee(&db, "Maria").await?;

        let employees: Repository<'_, _, Employee> = Repository::new(&db);
        employees
            .create(EmployeeCreate {
                name: "Pedro".to_string(),
                national_id: "002-0000003-3".to_string(),
                shift: Shift::Night,
                commission_percent: 2.5,
                active: true,
            })
            .await?;

        assert_eq!(employees.by_shift(Shift::Morning).await?, vec![morning]);
        assert_eq!(employees.by_shift(Shift::Night).await?.len(), 1);
        assert!(employees.by_shift(Shift::Afternoon).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_cafeterias_by_campus() -> Result<()> {
        let db = setup_test_db().await?;
        let campuses: Repository<'_, _, Campus> = Repository::new(&db);
        let main = campuses
            .create(CampusCreate {
                description: "Campus I".to_string(),
                active: true,
            })
            .await?;

        let cafeterias: Repository<'_, _, Cafeteria> = Repository::new(&db);
        let express = cafeterias
            .create(CafeteriaCreate {
                description: "Express".to_string(),
                campus_id: main.id.clone(),
                manager: "Juan".to_string(),
                active: true,
            })
            .await?;

        assert_eq!(cafeterias.by_campus(&main.id).await?, vec![express]);
        assert!(cafeterias.by_campus("elsewhere").await?.is_empty());

        Ok(())
    }
}
