mod qualified_name_tests;
