mod cache_store_tests;
