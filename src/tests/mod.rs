mod admin_testcases;
