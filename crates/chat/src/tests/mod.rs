//! Tests der Sitzungsschleife und der Annahme-Schleife
