pub mod directory_page;
