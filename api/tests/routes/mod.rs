mod auth_test;
mod deadline_test;
mod health_test;
mod submissions_test;
