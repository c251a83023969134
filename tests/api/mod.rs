mod books_tests;
mod docs_tests;
mod recipes_tests;
