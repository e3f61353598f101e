mod sexp_test;
