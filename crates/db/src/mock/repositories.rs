use chrono::{NaiveDate, NaiveTime};
use mockall::mock;

use crate::models::{DbAppointment, DbCar, DbMasterSchedule, DbService, DbUser};

// Mock repositories for testing
mock! {
    pub CatalogRepo {
        pub async fn get_service_by_id(&self, id: i32) -> eyre::Result<Option<DbService>>;

        pub async fn get_car_by_id(&self, id: i32) -> eyre::Result<Option<DbCar>>;
    }
}

mock! {
    pub ScheduleRepo {
        pub async fn get_active_schedule_for_day(
            &self,
            master_id: i32,
            day_of_week: i16,
        ) -> eyre::Result<Option<DbMasterSchedule>>;

        pub async fn get_booked_times(
            &self,
            master_id: i32,
            date: NaiveDate,
        ) -> eyre::Result<Vec<NaiveTime>>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn create_appointment(
            &self,
            user_id: i32,
            master_id: i32,
            service_id: i32,
            date: NaiveDate,
            time: NaiveTime,
            comment: Option<String>,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn get_appointment_by_id(&self, id: i32) -> eyre::Result<Option<DbAppointment>>;

        pub async fn cancel_appointment(&self, id: i32) -> eyre::Result<Option<DbAppointment>>;
    }
}

mock! {
    pub UserRepo {
        pub async fn get_user_by_email(&self, email: String) -> eyre::Result<Option<DbUser>>;
    }
}
