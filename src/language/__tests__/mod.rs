mod compact_test;
