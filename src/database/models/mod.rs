pub mod article;
pub mod category;
pub mod department;
pub mod site_setting;
pub mod sys_api;
pub mod sys_role;
pub mod user;

pub use article::Article;
pub use category::Category;
pub use department::Department;
pub use site_setting::SiteSetting;
pub use sys_api::SysApi;
pub use sys_role::SysRole;
pub use user::User;
