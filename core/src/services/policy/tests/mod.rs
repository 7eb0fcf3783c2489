mod roles_tests;
